//! Shared building blocks for the workflow core.
//!
//! - Validated value types with accumulating smart constructors
//! - The [`Validator`] combinator and `zip` helpers for multi-field checks
//! - MSISDN normalization
//! - Explicit security context with scoped privilege elevation

pub mod msisdn;
pub mod security;
pub mod types;
pub mod validation;

pub use security::{Authority, SecurityContext, run_as_superuser};
pub use types::{
    EmailAddress, Msisdn, NonEmptyString, PositiveInt, PositiveLong, PostalCode, SimpleType,
    StrExt,
};
pub use validation::{
    ValidatedExt, ValidationError, ValidationErrors, Validator, zip, zip3, zip4,
};
