//! Appointment business errors.

use common::ValidationErrors;
use thiserror::Error;
use workflow::{ErrorKind, PortError, WorkflowError, WorkflowFailure};

use super::{AppointmentId, AppointmentStatus};

/// Business-rule failures of appointment workflows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppointmentError {
    /// No appointment with this ID is in the status the operation requires.
    #[error("Appointment Not Found. id={id}, status={expected}")]
    NotInStatus {
        id: AppointmentId,
        expected: AppointmentStatus,
    },

    /// No appointment exists with this ID.
    #[error("Appointment Not Found. id={0}")]
    NotFound(AppointmentId),

    /// The requested time slot is already taken.
    #[error("{0}")]
    DateTimeUnavailable(String),

    /// Input failed field validation; carries every violation.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// The appointment can no longer be cancelled.
    #[error("{0}")]
    CancellationNotAllowed(String),

    /// The appointment could not be paid.
    #[error("{0}")]
    Payment(String),

    /// The appointment is in a terminal status.
    #[error("Appointment {id} is {status}; no further transitions are allowed")]
    TransitionRejected {
        id: AppointmentId,
        status: AppointmentStatus,
    },

    /// The appointment was modified concurrently.
    #[error("{0}")]
    Conflict(String),
}

impl WorkflowError for AppointmentError {
    fn kind(&self) -> ErrorKind {
        match self {
            AppointmentError::NotInStatus { .. } | AppointmentError::NotFound(_) => {
                ErrorKind::NotFound
            }
            AppointmentError::Validation(_)
            | AppointmentError::CancellationNotAllowed(_)
            | AppointmentError::Payment(_) => ErrorKind::Precondition,
            AppointmentError::DateTimeUnavailable(_)
            | AppointmentError::TransitionRejected { .. }
            | AppointmentError::Conflict(_) => ErrorKind::Conflict,
        }
    }
}

impl AppointmentError {
    /// Re-expresses a port failure in the workflow error channel.
    ///
    /// Optimistic-concurrency conflicts become [`AppointmentError::Conflict`];
    /// every other port failure stays a fault.
    pub fn from_port(error: PortError) -> WorkflowFailure<AppointmentError> {
        match error {
            PortError::Conflict { .. } => {
                WorkflowFailure::Rejected(AppointmentError::Conflict(error.to_string()))
            }
            other => WorkflowFailure::Fault(other),
        }
    }
}
