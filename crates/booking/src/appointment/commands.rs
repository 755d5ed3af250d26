//! Appointment commands and queries.

use chrono::{DateTime, Utc};
use workflow::{Command, Query, Request};

use super::{
    AppointmentCancelledEvent, AppointmentCompletedEvent, AppointmentError,
    AppointmentFoundEvent, AppointmentId, AppointmentPaidEvent, AppointmentScheduledEvent,
    AppointmentStartedEvent,
};

/// Command to book a new appointment.
///
/// Fields are raw caller input; the scheduling workflow validates all of them
/// in one pass.
#[derive(Debug, Clone)]
pub struct ScheduleAppointmentCommand {
    pub user_id: String,
    pub scheduled_time: DateTime<Utc>,
    /// Length in minutes.
    pub duration: i64,
    pub service: String,
    pub work_order_notes: Option<String>,
}

impl ScheduleAppointmentCommand {
    pub fn new(
        user_id: impl Into<String>,
        scheduled_time: DateTime<Utc>,
        duration: i64,
        service: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            scheduled_time,
            duration,
            service: service.into(),
            work_order_notes: None,
        }
    }

    /// Attaches notes to the work order.
    pub fn with_work_order_notes(mut self, notes: impl Into<String>) -> Self {
        self.work_order_notes = Some(notes.into());
        self
    }
}

impl Request for ScheduleAppointmentCommand {
    const NAME: &'static str = "ScheduleAppointmentCommand";
    type Event = AppointmentScheduledEvent;
    type Error = AppointmentError;
}

impl Command for ScheduleAppointmentCommand {}

/// Command to start work on a scheduled appointment.
#[derive(Debug, Clone)]
pub struct StartAppointmentCommand {
    pub appointment_id: AppointmentId,
}

impl StartAppointmentCommand {
    pub fn new(appointment_id: AppointmentId) -> Self {
        Self { appointment_id }
    }
}

impl Request for StartAppointmentCommand {
    const NAME: &'static str = "StartAppointmentCommand";
    type Event = AppointmentStartedEvent;
    type Error = AppointmentError;
}

impl Command for StartAppointmentCommand {}

/// Command to complete an appointment in progress.
#[derive(Debug, Clone)]
pub struct CompleteAppointmentCommand {
    pub appointment_id: AppointmentId,
    pub notes: Option<String>,
}

impl CompleteAppointmentCommand {
    pub fn new(appointment_id: AppointmentId, notes: Option<String>) -> Self {
        Self {
            appointment_id,
            notes,
        }
    }
}

impl Request for CompleteAppointmentCommand {
    const NAME: &'static str = "CompleteAppointmentCommand";
    type Event = AppointmentCompletedEvent;
    type Error = AppointmentError;
}

impl Command for CompleteAppointmentCommand {}

/// Command to cancel an appointment before it is completed.
#[derive(Debug, Clone)]
pub struct CancelAppointmentCommand {
    pub appointment_id: AppointmentId,
    pub notes: Option<String>,
}

impl CancelAppointmentCommand {
    pub fn new(appointment_id: AppointmentId, notes: Option<String>) -> Self {
        Self {
            appointment_id,
            notes,
        }
    }
}

impl Request for CancelAppointmentCommand {
    const NAME: &'static str = "CancelAppointmentCommand";
    type Event = AppointmentCancelledEvent;
    type Error = AppointmentError;
}

impl Command for CancelAppointmentCommand {}

/// Command to pay for a completed appointment.
#[derive(Debug, Clone)]
pub struct PayAppointmentCommand {
    pub appointment_id: AppointmentId,
    pub payment_method_id: String,
}

impl PayAppointmentCommand {
    pub fn new(appointment_id: AppointmentId, payment_method_id: impl Into<String>) -> Self {
        Self {
            appointment_id,
            payment_method_id: payment_method_id.into(),
        }
    }
}

impl Request for PayAppointmentCommand {
    const NAME: &'static str = "PayAppointmentCommand";
    type Event = AppointmentPaidEvent;
    type Error = AppointmentError;
}

impl Command for PayAppointmentCommand {}

/// Query for an appointment in any status.
#[derive(Debug, Clone)]
pub struct FindAppointmentQuery {
    pub appointment_id: AppointmentId,
}

impl FindAppointmentQuery {
    pub fn new(appointment_id: AppointmentId) -> Self {
        Self { appointment_id }
    }
}

impl Request for FindAppointmentQuery {
    const NAME: &'static str = "FindAppointmentQuery";
    type Event = AppointmentFoundEvent;
    type Error = AppointmentError;
}

impl Query for FindAppointmentQuery {}
