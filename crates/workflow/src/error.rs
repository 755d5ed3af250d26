//! Workflow error taxonomy.

use std::fmt;

use thiserror::Error;

use crate::effect::WorkflowFailure;

/// How a business failure should be reported to a client.
///
/// The kind is declared by each error variant so that every transport derives
/// its status from the error alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A client-visible precondition was not met.
    Precondition,
    /// A required aggregate does not exist in the expected state.
    NotFound,
    /// The request conflicts with the current domain state.
    Conflict,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Precondition => "precondition",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closed family of business-rule failures.
///
/// Implemented by one enum per domain; exactly one variant accompanies a
/// failed workflow execution.
pub trait WorkflowError: std::error::Error + Send + Sync + 'static {
    /// Returns the reporting kind of this variant.
    fn kind(&self) -> ErrorKind;

    /// Returns the human-readable explanation.
    fn explanation(&self) -> String {
        self.to_string()
    }
}

/// Failures raised by external ports (persistence, payment, ...).
///
/// Conflicts are re-expressed by workflows as domain conflict variants; every
/// other port failure escalates as an unrecoverable fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    /// The aggregate changed since it was read.
    #[error("Concurrent modification of {resource}: expected version {expected}, found {actual}")]
    Conflict {
        resource: String,
        expected: u64,
        actual: u64,
    },

    /// The caller's security context lacks a required authority.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The backend could not be reached or timed out.
    #[error("Port unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure.
    #[error("Backend failure: {0}")]
    Backend(String),
}

/// Raised when a request type has no registered workflow.
///
/// Indicates a deployment defect rather than a user-triggered condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No workflow registered for request type {request}")]
pub struct ConfigurationError {
    pub request: &'static str,
}

/// Startup-time registry misconfiguration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A second workflow was registered for an already-handled request type.
    #[error("Request type {request} already handled by {existing}; refusing {rejected}")]
    Duplicate {
        request: &'static str,
        existing: &'static str,
        rejected: &'static str,
    },

    /// Required request types were left without a workflow.
    #[error("No workflow registered for required request types: {}", .requests.join(", "))]
    Missing { requests: Vec<&'static str> },
}

/// Failure returned by the dispatcher.
#[derive(Debug, Error)]
pub enum DispatchError<E> {
    /// The workflow rejected the request with a business error.
    #[error("{0}")]
    Rejected(#[source] E),
    /// An external port failed in a way the workflow could not express as a
    /// business error.
    #[error("Unrecoverable fault: {0}")]
    Fault(#[source] PortError),
    /// No workflow is registered for the request type.
    #[error("{0}")]
    Unhandled(#[source] ConfigurationError),
}

impl<E: WorkflowError> DispatchError<E> {
    /// Returns the reporting kind for business rejections.
    ///
    /// Faults and unhandled requests have no business kind.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            DispatchError::Rejected(error) => Some(error.kind()),
            DispatchError::Fault(_) | DispatchError::Unhandled(_) => None,
        }
    }

    /// Returns the business error, if this is a rejection.
    pub fn rejection(&self) -> Option<&E> {
        match self {
            DispatchError::Rejected(error) => Some(error),
            _ => None,
        }
    }

    /// Consumes the error, returning the business error if this is a rejection.
    pub fn into_rejection(self) -> Option<E> {
        match self {
            DispatchError::Rejected(error) => Some(error),
            _ => None,
        }
    }

    /// Returns true when no workflow handled the request.
    pub fn is_unhandled(&self) -> bool {
        matches!(self, DispatchError::Unhandled(_))
    }
}

impl<E> From<ConfigurationError> for DispatchError<E> {
    fn from(error: ConfigurationError) -> Self {
        DispatchError::Unhandled(error)
    }
}

impl<E> From<WorkflowFailure<E>> for DispatchError<E> {
    fn from(failure: WorkflowFailure<E>) -> Self {
        match failure {
            WorkflowFailure::Rejected(error) => DispatchError::Rejected(error),
            WorkflowFailure::Fault(error) => DispatchError::Fault(error),
        }
    }
}
