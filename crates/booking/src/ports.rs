//! Outbound ports the appointment workflows depend on.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{NonEmptyString, PositiveLong};
use workflow::PortError;

use crate::appointment::{
    Appointment, AppointmentEvent, AppointmentId, AppointmentStatus, PaymentMethod,
};

/// Reads appointments.
#[async_trait]
pub trait FindAppointmentPort: Send + Sync {
    /// Finds an appointment in any status.
    async fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>, PortError>;

    /// Finds an appointment only if it is currently in `status`.
    async fn find_by_id_in_state(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, PortError>;
}

/// Persists and publishes appointment events.
///
/// Implementations enforce optimistic concurrency on the carried snapshot's
/// version and report a stale write as [`PortError::Conflict`]. Retried calls
/// are not deduplicated.
#[async_trait]
pub trait AppointmentEventPort: Send + Sync {
    async fn handle(&self, event: AppointmentEvent) -> Result<AppointmentEvent, PortError>;
}

/// Decides whether a time slot can be booked.
#[async_trait]
pub trait AvailabilityPort: Send + Sync {
    /// Returns true if `[start, start + duration minutes)` is free.
    async fn is_available(
        &self,
        start: DateTime<Utc>,
        duration: PositiveLong,
    ) -> Result<bool, PortError>;
}

/// Looks up stored payment methods.
#[async_trait]
pub trait PaymentMethodPort: Send + Sync {
    async fn find_payment_method(
        &self,
        user_id: &NonEmptyString,
        payment_method_id: &str,
    ) -> Result<Option<PaymentMethod>, PortError>;
}
