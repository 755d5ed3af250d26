//! Value objects for the appointment domain.

use common::{NonEmptyString, SimpleType, ValidationError, ValidationErrors, Validator, zip};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(Uuid);

impl AppointmentId {
    /// Creates a new random appointment ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an appointment ID from untrusted input.
    pub fn parse(raw: &str) -> Result<Self, ValidationErrors> {
        Uuid::parse_str(raw.trim()).map(Self).map_err(|_| {
            ValidationError::rejected("AppointmentId", "value", &raw, "Must be a valid UUID").into()
        })
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AppointmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for AppointmentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// What is to be done during an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    service: NonEmptyString,
    notes: Option<String>,
}

impl WorkOrder {
    /// Validates a work order, reporting every invalid field.
    pub fn of(service: String, notes: Option<String>) -> Result<Self, ValidationErrors> {
        let notes_valid = notes.as_deref().is_none_or(|text| !text.trim().is_empty());
        let checked_notes = Validator::new("WorkOrder", "notes", &notes.as_deref().unwrap_or(""))
            .check(notes_valid, "Must not be blank when present")
            .finish();
        let not_blank = Validator::new("WorkOrder", "service", &service)
            .check(!service.trim().is_empty(), "Must not be blank")
            .finish();
        let checked_service = zip(not_blank, NonEmptyString::of(service.clone()));

        let (((), service), ()) = zip(checked_service, checked_notes)?;
        Ok(Self { service, notes })
    }

    pub fn service(&self) -> &NonEmptyString {
        &self.service
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// A stored means of payment belonging to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub user_id: NonEmptyString,
    pub active: bool,
}

impl PaymentMethod {
    pub fn new(id: impl Into<String>, user_id: NonEmptyString) -> Self {
        Self {
            id: id.into(),
            user_id,
            active: true,
        }
    }

    /// Returns a copy of this payment method marked inactive.
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }
}
