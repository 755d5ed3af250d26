//! Accumulating validation primitives.
//!
//! Field-level checks never stop at the first failure: every predicate of a
//! candidate value is evaluated and all violations are reported together in a
//! [`ValidationErrors`] collection, which is non-empty by construction.

use std::fmt;

use nonempty::NonEmpty;
use thiserror::Error;

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    /// Creates a violation with a free-form message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates a violation naming the type, field, rejected value and rule.
    ///
    /// Rendered as `'{raw}' of {type_name}.{field}: {rule}`.
    pub fn rejected(type_name: &str, field: &str, raw: &dyn fmt::Display, rule: &str) -> Self {
        Self::new(format!("'{raw}' of {type_name}.{field}: {rule}"))
    }

    /// Returns the violation message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every violation found by one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render(.0))]
pub struct ValidationErrors(NonEmpty<ValidationError>);

fn render(errors: &NonEmpty<ValidationError>) -> String {
    errors
        .iter()
        .map(ValidationError::message)
        .collect::<Vec<_>>()
        .join("\n")
}

impl ValidationErrors {
    /// Wraps a single violation.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmpty::new(error))
    }

    /// Builds a collection from a list of violations.
    ///
    /// Returns `None` when the list is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        NonEmpty::from_vec(errors).map(Self)
    }

    /// Appends every violation of `other`, preserving order.
    pub fn merge(mut self, other: ValidationErrors) -> Self {
        for error in other.0 {
            self.0.push(error);
        }
        self
    }

    /// Returns the number of violations (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the first violation.
    pub fn first(&self) -> &ValidationError {
        self.0.first()
    }

    /// Iterates over the violations in the order they were found.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns the violation messages in order.
    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(ValidationError::message).collect()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self::single(error)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = <NonEmpty<ValidationError> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Runs independent predicates against one candidate field and collects
/// every violation.
///
/// ```
/// use common::Validator;
///
/// let result = Validator::new("EmailAddress", "value", &"")
///     .check(false, "Must not be empty")
///     .check(false, "Must be a valid email address")
///     .finish();
///
/// assert_eq!(result.unwrap_err().len(), 2);
/// ```
#[derive(Debug)]
pub struct Validator {
    type_name: &'static str,
    field: &'static str,
    raw: String,
    errors: Vec<ValidationError>,
}

impl Validator {
    /// Starts validating `raw` as `type_name.field`.
    pub fn new(type_name: &'static str, field: &'static str, raw: &dyn fmt::Display) -> Self {
        Self {
            type_name,
            field,
            raw: raw.to_string(),
            errors: Vec::new(),
        }
    }

    /// Records a violation of `rule` unless `passed` holds.
    pub fn check(mut self, passed: bool, rule: &str) -> Self {
        if !passed {
            self.errors.push(ValidationError::rejected(
                self.type_name,
                self.field,
                &self.raw,
                rule,
            ));
        }
        self
    }

    /// Finishes the pass, failing with every recorded violation.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        match ValidationErrors::from_vec(self.errors) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }
}

/// Combines two independent validation results, accumulating failures.
pub fn zip<A, B>(
    a: Result<A, ValidationErrors>,
    b: Result<B, ValidationErrors>,
) -> Result<(A, B), ValidationErrors> {
    match (a, b) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Err(first), Err(second)) => Err(first.merge(second)),
    }
}

/// Three-way [`zip`].
pub fn zip3<A, B, C>(
    a: Result<A, ValidationErrors>,
    b: Result<B, ValidationErrors>,
    c: Result<C, ValidationErrors>,
) -> Result<(A, B, C), ValidationErrors> {
    let ((a, b), c) = zip(zip(a, b), c)?;
    Ok((a, b, c))
}

/// Four-way [`zip`].
pub fn zip4<A, B, C, D>(
    a: Result<A, ValidationErrors>,
    b: Result<B, ValidationErrors>,
    c: Result<C, ValidationErrors>,
    d: Result<D, ValidationErrors>,
) -> Result<(A, B, C, D), ValidationErrors> {
    let ((a, b, c), d) = zip(zip3(a, b, c), d)?;
    Ok((a, b, c, d))
}

/// Lifts a validation result into a short-circuiting error channel.
///
/// The whole violation collection travels inside the target error, so call
/// sites that only need to gate further steps still report every defect.
pub trait ValidatedExt<T> {
    /// Converts the failure branch into `E`, keeping the full payload.
    fn or_shift<E: From<ValidationErrors>>(self) -> Result<T, E>;
}

impl<T> ValidatedExt<T> for Result<T, ValidationErrors> {
    fn or_shift<E: From<ValidationErrors>>(self) -> Result<T, E> {
        self.map_err(E::from)
    }
}
