//! User business errors.

use common::ValidationErrors;
use thiserror::Error;
use workflow::{ErrorKind, PortError, WorkflowError, WorkflowFailure};

/// Business-rule failures of user workflows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    /// No user matches the lookup key.
    #[error("User not found: {0}")]
    NotFound(String),

    /// A user with the same email is already registered.
    #[error("{0}")]
    AlreadyExists(String),

    /// Input failed field validation; carries every violation.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
}

impl WorkflowError for UserError {
    fn kind(&self) -> ErrorKind {
        match self {
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::AlreadyExists(_) => ErrorKind::Conflict,
            UserError::Validation(_) => ErrorKind::Precondition,
        }
    }
}

impl UserError {
    /// Re-expresses a port failure in the workflow error channel.
    ///
    /// A uniqueness conflict reported by the store means the user was
    /// registered concurrently; everything else is a fault.
    pub fn from_port(error: PortError, msisdn: &str) -> WorkflowFailure<UserError> {
        match error {
            PortError::Conflict { .. } => {
                WorkflowFailure::Rejected(UserError::AlreadyExists(format!("User {msisdn} exists")))
            }
            other => WorkflowFailure::Fault(other),
        }
    }
}
