//! Appointment aggregate.

use chrono::{DateTime, TimeDelta, Utc};
use common::{NonEmptyString, PositiveLong};
use serde::{Deserialize, Serialize};

use super::{AppointmentError, AppointmentId, AppointmentStatus, WorkOrder};

/// Appointment aggregate root.
///
/// Transitions are pure: each consumes the current snapshot and returns the
/// next one with its version bumped, or the rule it violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    id: AppointmentId,
    user_id: NonEmptyString,
    scheduled_time: DateTime<Utc>,
    /// Length in minutes.
    duration: PositiveLong,
    work_order: WorkOrder,
    status: AppointmentStatus,
    notes: Option<String>,
    payment_method_id: Option<String>,
    /// Optimistic concurrency version, starting at 1.
    version: u64,
}

/// Read-only snapshot of an appointment, carried by every appointment event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDto {
    pub id: AppointmentId,
    pub user_id: NonEmptyString,
    pub scheduled_time: DateTime<Utc>,
    pub duration: PositiveLong,
    pub work_order: WorkOrder,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub payment_method_id: Option<String>,
    pub version: u64,
}

impl Appointment {
    /// Creates a newly scheduled appointment.
    pub fn schedule(
        user_id: NonEmptyString,
        scheduled_time: DateTime<Utc>,
        duration: PositiveLong,
        work_order: WorkOrder,
    ) -> Self {
        Self {
            id: AppointmentId::new(),
            user_id,
            scheduled_time,
            duration,
            work_order,
            status: AppointmentStatus::Scheduled,
            notes: None,
            payment_method_id: None,
            version: 1,
        }
    }

    pub fn id(&self) -> AppointmentId {
        self.id
    }

    pub fn user_id(&self) -> &NonEmptyString {
        &self.user_id
    }

    pub fn scheduled_time(&self) -> DateTime<Utc> {
        self.scheduled_time
    }

    pub fn duration(&self) -> PositiveLong {
        self.duration
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns the end of the booked slot.
    pub fn ends_at(&self) -> DateTime<Utc> {
        slot_end(self.scheduled_time, self.duration)
    }

    /// Returns true if this appointment's slot intersects `[start, start + duration)`.
    pub fn overlaps(&self, start: DateTime<Utc>, duration: PositiveLong) -> bool {
        self.scheduled_time < slot_end(start, duration) && start < self.ends_at()
    }

    /// Starts work on a scheduled appointment.
    pub fn start(self) -> Result<Self, AppointmentError> {
        self.guard(self.status.can_start())?;
        Ok(self.advance(AppointmentStatus::InProgress))
    }

    /// Completes an appointment in progress, recording `notes` verbatim.
    pub fn complete(self, notes: Option<String>) -> Result<Self, AppointmentError> {
        self.guard(self.status.can_complete())?;
        let mut next = self.advance(AppointmentStatus::Completed);
        if notes.is_some() {
            next.notes = notes;
        }
        Ok(next)
    }

    /// Cancels an appointment that has not been completed yet.
    pub fn cancel(self, notes: Option<String>) -> Result<Self, AppointmentError> {
        if self.status == AppointmentStatus::Completed {
            return Err(AppointmentError::CancellationNotAllowed(format!(
                "Appointment {} is already Completed and can no longer be cancelled",
                self.id
            )));
        }
        self.guard(self.status.can_cancel())?;
        let mut next = self.advance(AppointmentStatus::Cancelled);
        if notes.is_some() {
            next.notes = notes;
        }
        Ok(next)
    }

    /// Settles a completed appointment with the given payment method.
    pub fn pay(self, payment_method_id: String) -> Result<Self, AppointmentError> {
        self.guard(self.status.can_pay())?;
        let mut next = self.advance(AppointmentStatus::Paid);
        next.payment_method_id = Some(payment_method_id);
        Ok(next)
    }

    /// Returns the snapshot of this appointment.
    pub fn to_dto(&self) -> AppointmentDto {
        AppointmentDto {
            id: self.id,
            user_id: self.user_id.clone(),
            scheduled_time: self.scheduled_time,
            duration: self.duration,
            work_order: self.work_order.clone(),
            status: self.status,
            notes: self.notes.clone(),
            payment_method_id: self.payment_method_id.clone(),
            version: self.version,
        }
    }

    fn guard(&self, allowed: bool) -> Result<(), AppointmentError> {
        if allowed {
            return Ok(());
        }
        Err(AppointmentError::TransitionRejected {
            id: self.id,
            status: self.status,
        })
    }

    fn advance(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self.version += 1;
        self
    }
}

impl From<AppointmentDto> for Appointment {
    fn from(dto: AppointmentDto) -> Self {
        Self {
            id: dto.id,
            user_id: dto.user_id,
            scheduled_time: dto.scheduled_time,
            duration: dto.duration,
            work_order: dto.work_order,
            status: dto.status,
            notes: dto.notes,
            payment_method_id: dto.payment_method_id,
            version: dto.version,
        }
    }
}

fn slot_end(start: DateTime<Utc>, duration: PositiveLong) -> DateTime<Utc> {
    TimeDelta::try_minutes(duration.get())
        .and_then(|delta| start.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
