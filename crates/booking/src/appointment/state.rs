//! Appointment state machine.

use serde::{Deserialize, Serialize};

/// The status of an appointment in its lifecycle.
///
/// State transitions:
/// ```text
/// Scheduled ──► InProgress ──► Completed ──► Paid
///     │             │
///     └─────────────┴──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AppointmentStatus {
    /// Booked for a future time slot.
    #[default]
    Scheduled,

    /// Work has started.
    InProgress,

    /// Work is done, awaiting payment.
    Completed,

    /// Called off before completion (terminal state).
    Cancelled,

    /// Settled (terminal state).
    Paid,
}

impl AppointmentStatus {
    /// Returns true if work can start in this status.
    pub fn can_start(&self) -> bool {
        matches!(self, AppointmentStatus::Scheduled)
    }

    /// Returns true if the appointment can be completed in this status.
    pub fn can_complete(&self) -> bool {
        matches!(self, AppointmentStatus::InProgress)
    }

    /// Returns true if the appointment can be cancelled in this status.
    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Scheduled | AppointmentStatus::InProgress
        )
    }

    /// Returns true if the appointment can be paid in this status.
    pub fn can_pay(&self) -> bool {
        matches!(self, AppointmentStatus::Completed)
    }

    /// Returns true if this is a terminal status (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Cancelled | AppointmentStatus::Paid)
    }

    /// Returns true while the appointment still occupies its time slot.
    pub fn holds_slot(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Scheduled | AppointmentStatus::InProgress
        )
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::InProgress => "InProgress",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Paid => "Paid",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Paid,
    ];

    #[test]
    fn test_default_status_is_scheduled() {
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Scheduled);
    }

    #[test]
    fn test_scheduled_can_start() {
        assert!(AppointmentStatus::Scheduled.can_start());
        assert!(!AppointmentStatus::InProgress.can_start());
        assert!(!AppointmentStatus::Completed.can_start());
        assert!(!AppointmentStatus::Cancelled.can_start());
        assert!(!AppointmentStatus::Paid.can_start());
    }

    #[test]
    fn test_in_progress_can_complete() {
        assert!(!AppointmentStatus::Scheduled.can_complete());
        assert!(AppointmentStatus::InProgress.can_complete());
        assert!(!AppointmentStatus::Completed.can_complete());
    }

    #[test]
    fn test_can_cancel_before_completion() {
        assert!(AppointmentStatus::Scheduled.can_cancel());
        assert!(AppointmentStatus::InProgress.can_cancel());
        assert!(!AppointmentStatus::Completed.can_cancel());
        assert!(!AppointmentStatus::Cancelled.can_cancel());
        assert!(!AppointmentStatus::Paid.can_cancel());
    }

    #[test]
    fn test_completed_can_pay() {
        assert!(AppointmentStatus::Completed.can_pay());
        assert!(!AppointmentStatus::InProgress.can_pay());
        assert!(!AppointmentStatus::Paid.can_pay());
    }

    #[test]
    fn test_terminal_statuses_accept_nothing() {
        for status in ALL.iter().filter(|status| status.is_terminal()) {
            assert!(!status.can_start());
            assert!(!status.can_complete());
            assert!(!status.can_cancel());
            assert!(!status.can_pay());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(AppointmentStatus::InProgress.to_string(), "InProgress");
        assert_eq!(AppointmentStatus::Paid.to_string(), "Paid");
    }
}
