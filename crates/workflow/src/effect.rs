//! Short-circuiting effect context.
//!
//! Workflow steps return [`Effect`]; sequencing with `?` means the first step
//! that shifts becomes the result of the whole computation and later steps
//! never run. Side effects already performed are not rolled back.

use common::ValidationErrors;
use thiserror::Error;

use crate::error::PortError;

/// Why a workflow execution stopped.
#[derive(Debug, Error)]
pub enum WorkflowFailure<E> {
    /// A business rule failed.
    #[error("{0}")]
    Rejected(#[source] E),
    /// A port failed in a way that has no business meaning.
    #[error("Unrecoverable fault: {0}")]
    Fault(#[source] PortError),
}

impl<E> WorkflowFailure<E> {
    /// Returns the business error, if any.
    pub fn rejection(&self) -> Option<&E> {
        match self {
            WorkflowFailure::Rejected(error) => Some(error),
            WorkflowFailure::Fault(_) => None,
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, WorkflowFailure::Fault(_))
    }
}

impl<E> From<PortError> for WorkflowFailure<E> {
    fn from(error: PortError) -> Self {
        WorkflowFailure::Fault(error)
    }
}

impl<E: From<ValidationErrors>> From<ValidationErrors> for WorkflowFailure<E> {
    fn from(errors: ValidationErrors) -> Self {
        WorkflowFailure::Rejected(E::from(errors))
    }
}

/// Result of a shiftable workflow step.
pub type Effect<T, E> = Result<T, WorkflowFailure<E>>;

/// Aborts the current computation with `error`.
pub fn shift<T, E>(error: E) -> Effect<T, E> {
    Err(WorkflowFailure::Rejected(error))
}

/// Shifts with the error built by `otherwise` unless `condition` holds.
pub fn ensure<E>(condition: bool, otherwise: impl FnOnce() -> E) -> Effect<(), E> {
    if condition {
        Ok(())
    } else {
        shift(otherwise())
    }
}

/// Unwraps `value` or shifts with the error built by `otherwise`.
pub fn ensure_some<T, E>(value: Option<T>, otherwise: impl FnOnce() -> E) -> Effect<T, E> {
    match value {
        Some(value) => Ok(value),
        None => shift(otherwise()),
    }
}

/// Lifts a plain business result into the effect context.
pub trait IntoEffect<T, E> {
    fn into_effect(self) -> Effect<T, E>;
}

impl<T, E> IntoEffect<T, E> for Result<T, E> {
    fn into_effect(self) -> Effect<T, E> {
        self.map_err(WorkflowFailure::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use common::ValidationError;

    use super::*;

    #[derive(Debug, PartialEq)]
    enum StepError {
        First,
        Second,
        Invalid(usize),
    }

    impl From<ValidationErrors> for StepError {
        fn from(errors: ValidationErrors) -> Self {
            StepError::Invalid(errors.len())
        }
    }

    fn sequence(first_fails: bool, second_calls: &Cell<usize>) -> Effect<u32, StepError> {
        ensure(!first_fails, || StepError::First)?;
        second_calls.set(second_calls.get() + 1);
        ensure(false, || StepError::Second)?;
        Ok(1)
    }

    #[test]
    fn test_first_shift_wins() {
        let calls = Cell::new(0);
        let result = sequence(true, &calls);

        assert!(matches!(result, Err(WorkflowFailure::Rejected(StepError::First))));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_later_step_runs_when_earlier_passes() {
        let calls = Cell::new(0);
        let result = sequence(false, &calls);

        assert!(matches!(result, Err(WorkflowFailure::Rejected(StepError::Second))));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_ensure_some() {
        let found: Effect<i32, StepError> = ensure_some(Some(3), || StepError::First);
        let missing: Effect<i32, StepError> = ensure_some(None, || StepError::First);

        assert_eq!(found.unwrap(), 3);
        assert!(matches!(missing, Err(WorkflowFailure::Rejected(StepError::First))));
    }

    #[test]
    fn test_validation_payload_travels_whole() {
        fn step() -> Effect<(), StepError> {
            let errors = ValidationErrors::single(ValidationError::new("a"))
                .merge(ValidationErrors::single(ValidationError::new("b")));
            Err::<(), _>(errors)?;
            Ok(())
        }

        assert!(matches!(step(), Err(WorkflowFailure::Rejected(StepError::Invalid(2)))));
    }

    #[test]
    fn test_port_error_becomes_fault() {
        fn step() -> Effect<(), StepError> {
            Err::<(), _>(PortError::Unavailable("timeout".into()))?;
            Ok(())
        }

        let failure = step().unwrap_err();
        assert!(failure.is_fault());
        assert!(failure.rejection().is_none());
    }

    #[test]
    fn test_into_effect() {
        let plain: Result<u8, StepError> = Err(StepError::Second);
        assert!(matches!(
            plain.into_effect(),
            Err(WorkflowFailure::Rejected(StepError::Second))
        ));
    }
}
