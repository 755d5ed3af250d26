//! Validated value types.
//!
//! Each type can only be obtained through its `of` smart constructor, which
//! runs every declared predicate and reports all violations at once. Fields are
//! private and deserialization goes through the same constructor, so a live
//! instance always satisfies its invariants.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::msisdn;
use crate::validation::{ValidationErrors, Validator};

/// A primitive wrapped together with the predicates it has passed.
pub trait SimpleType: Sized {
    /// The wrapped primitive.
    type Raw;

    /// Validates `raw`, returning the value or every violated predicate.
    fn of(raw: Self::Raw) -> Result<Self, ValidationErrors>;

    /// Returns the wrapped primitive.
    fn value(&self) -> &Self::Raw;
}

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

const POSTAL_CODE_PATTERN_STR: &str = r"^\d{5}$";

static POSTAL_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(POSTAL_CODE_PATTERN_STR).expect("postal code pattern is valid"));

// Conversions shared by every string-backed type.
macro_rules! string_type_conversions {
    ($name:ident) => {
        impl $name {
            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationErrors;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                Self::of(raw)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ValidationErrors;

            fn try_from(raw: &str) -> Result<Self, Self::Error> {
                Self::of(raw.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// A string with at least one character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

impl SimpleType for NonEmptyString {
    type Raw = String;

    fn of(raw: String) -> Result<Self, ValidationErrors> {
        Validator::new("NonEmptyString", "value", &raw)
            .check(!raw.is_empty(), "Must not be empty")
            .finish()?;
        Ok(Self(raw))
    }

    fn value(&self) -> &String {
        &self.0
    }
}

string_type_conversions!(NonEmptyString);

/// An email address: non-empty and shaped like `local@domain.tld`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl SimpleType for EmailAddress {
    type Raw = String;

    fn of(raw: String) -> Result<Self, ValidationErrors> {
        Validator::new("EmailAddress", "value", &raw)
            .check(!raw.is_empty(), "Must not be empty")
            .check(EMAIL_PATTERN.is_match(&raw), "Must be a valid email address")
            .finish()?;
        Ok(Self(raw))
    }

    fn value(&self) -> &String {
        &self.0
    }
}

string_type_conversions!(EmailAddress);

/// A five digit postal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl SimpleType for PostalCode {
    type Raw = String;

    fn of(raw: String) -> Result<Self, ValidationErrors> {
        Validator::new("PostalCode", "value", &raw)
            .check(
                POSTAL_CODE_PATTERN.is_match(&raw),
                &format!("Must match the pattern '{POSTAL_CODE_PATTERN_STR}'"),
            )
            .finish()?;
        Ok(Self(raw))
    }

    fn value(&self) -> &String {
        &self.0
    }
}

string_type_conversions!(PostalCode);

/// A phone number in canonical international (E.164) form.
///
/// Normalization happens during construction: `Msisdn::of("(555) 234-5678")`
/// holds `+15552345678`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Msisdn(String);

impl SimpleType for Msisdn {
    type Raw = String;

    fn of(raw: String) -> Result<Self, ValidationErrors> {
        let canonical = msisdn::to_international(&raw);
        Validator::new("Msisdn", "value", &raw)
            .check(canonical.is_some(), "Must be a valid phone number")
            .finish()?;
        Ok(Self(canonical.unwrap_or(raw)))
    }

    fn value(&self) -> &String {
        &self.0
    }
}

string_type_conversions!(Msisdn);

/// A non-negative 32-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct PositiveInt(i32);

impl SimpleType for PositiveInt {
    type Raw = i32;

    fn of(raw: i32) -> Result<Self, ValidationErrors> {
        Validator::new("PositiveInt", "value", &raw)
            .check(raw >= 0, "Must be positive or zero")
            .finish()?;
        Ok(Self(raw))
    }

    fn value(&self) -> &i32 {
        &self.0
    }
}

impl PositiveInt {
    /// Returns the wrapped integer.
    pub fn get(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for PositiveInt {
    type Error = ValidationErrors;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        Self::of(raw)
    }
}

impl From<PositiveInt> for i32 {
    fn from(value: PositiveInt) -> Self {
        value.0
    }
}

impl fmt::Display for PositiveInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative 64-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PositiveLong(i64);

impl SimpleType for PositiveLong {
    type Raw = i64;

    fn of(raw: i64) -> Result<Self, ValidationErrors> {
        Validator::new("PositiveLong", "value", &raw)
            .check(raw >= 0, "Must be positive or zero")
            .finish()?;
        Ok(Self(raw))
    }

    fn value(&self) -> &i64 {
        &self.0
    }
}

impl PositiveLong {
    /// Returns the wrapped integer.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for PositiveLong {
    type Error = ValidationErrors;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::of(raw)
    }
}

impl From<PositiveLong> for i64 {
    fn from(value: PositiveLong) -> Self {
        value.0
    }
}

impl fmt::Display for PositiveLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shortcuts for building validated values from string slices.
pub trait StrExt {
    fn to_non_empty_string(&self) -> Result<NonEmptyString, ValidationErrors>;
    fn to_email_address(&self) -> Result<EmailAddress, ValidationErrors>;
    fn to_msisdn(&self) -> Result<Msisdn, ValidationErrors>;
    fn to_postal_code(&self) -> Result<PostalCode, ValidationErrors>;
}

impl StrExt for str {
    fn to_non_empty_string(&self) -> Result<NonEmptyString, ValidationErrors> {
        NonEmptyString::of(self.to_string())
    }

    fn to_email_address(&self) -> Result<EmailAddress, ValidationErrors> {
        EmailAddress::of(self.to_string())
    }

    fn to_msisdn(&self) -> Result<Msisdn, ValidationErrors> {
        Msisdn::of(self.to_string())
    }

    fn to_postal_code(&self) -> Result<PostalCode, ValidationErrors> {
        PostalCode::of(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_string_rejects_empty_with_one_violation() {
        let errors = NonEmptyString::of(String::new()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.first().message(),
            "'' of NonEmptyString.value: Must not be empty"
        );
    }

    #[test]
    fn test_non_empty_string_keeps_value() {
        let value = NonEmptyString::of("hello".to_string()).unwrap();
        assert_eq!(value.as_str(), "hello");
        assert_eq!(value.value(), "hello");
    }

    #[test]
    fn test_email_reports_every_violated_predicate() {
        let errors = EmailAddress::of(String::new()).unwrap_err();
        assert_eq!(errors.len(), 2);

        let errors = EmailAddress::of("not-an-email".to_string()).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec!["'not-an-email' of EmailAddress.value: Must be a valid email address"]
        );
    }

    #[test]
    fn test_email_accepts_valid_address() {
        assert!(EmailAddress::of("jane.doe+tag@mail.example.com".to_string()).is_ok());
    }

    #[test]
    fn test_postal_code() {
        assert!(PostalCode::of("12345".to_string()).is_ok());
        assert!(PostalCode::of("1234".to_string()).is_err());
        assert!(PostalCode::of("123456".to_string()).is_err());
        assert!(PostalCode::of("12a45".to_string()).is_err());
    }

    #[test]
    fn test_msisdn_is_normalized_on_construction() {
        let msisdn = Msisdn::of("(555) 234-5678".to_string()).unwrap();
        assert_eq!(msisdn.as_str(), "+15552345678");
    }

    #[test]
    fn test_msisdn_rejects_invalid_number() {
        let errors = Msisdn::of("call me".to_string()).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec!["'call me' of Msisdn.value: Must be a valid phone number"]
        );
    }

    #[test]
    fn test_positive_numbers() {
        assert_eq!(PositiveInt::of(0).unwrap().get(), 0);
        assert!(PositiveInt::of(-1).is_err());
        assert_eq!(PositiveLong::of(90).unwrap().get(), 90);
        assert_eq!(
            PositiveLong::of(-5).unwrap_err().first().message(),
            "'-5' of PositiveLong.value: Must be positive or zero"
        );
    }

    #[test]
    fn test_str_shortcuts() {
        assert!("x".to_non_empty_string().is_ok());
        assert!("".to_non_empty_string().is_err());
        assert!("a@b.io".to_email_address().is_ok());
        assert!("555-234-5678".to_msisdn().is_ok());
        assert!("90210".to_postal_code().is_ok());
    }

    #[test]
    fn test_serialization_is_transparent() {
        let email = EmailAddress::of("a@b.io".to_string()).unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"a@b.io\"");
    }

    #[test]
    fn test_deserialization_runs_smart_constructor() {
        let msisdn: Msisdn = serde_json::from_str("\"555 234 5678\"").unwrap();
        assert_eq!(msisdn.as_str(), "+15552345678");

        assert!(serde_json::from_str::<NonEmptyString>("\"\"").is_err());
        assert!(serde_json::from_str::<PositiveLong>("-1").is_err());
    }
}
