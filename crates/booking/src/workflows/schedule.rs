use std::sync::Arc;

use async_trait::async_trait;
use common::{NonEmptyString, PositiveLong, SimpleType, zip3};
use workflow::{Outcome, Workflow, ensure};

use super::persist;
use crate::appointment::{
    Appointment, AppointmentError, AppointmentScheduledEvent, ScheduleAppointmentCommand,
    WorkOrder,
};
use crate::ports::{AppointmentEventPort, AvailabilityPort};

/// Books a new appointment.
///
/// Every input field is validated in one pass before the slot is checked, so
/// a caller sees all field defects at once.
pub struct ScheduleAppointmentWorkflow {
    availability: Arc<dyn AvailabilityPort>,
    events: Arc<dyn AppointmentEventPort>,
}

impl ScheduleAppointmentWorkflow {
    pub fn new(
        availability: Arc<dyn AvailabilityPort>,
        events: Arc<dyn AppointmentEventPort>,
    ) -> Self {
        Self {
            availability,
            events,
        }
    }
}

#[async_trait]
impl Workflow for ScheduleAppointmentWorkflow {
    type Request = ScheduleAppointmentCommand;

    #[tracing::instrument(skip(self, request), fields(user_id = %request.user_id))]
    async fn execute(
        &self,
        request: ScheduleAppointmentCommand,
    ) -> Outcome<ScheduleAppointmentCommand> {
        let (user_id, duration, work_order) = zip3(
            NonEmptyString::of(request.user_id),
            PositiveLong::of(request.duration),
            WorkOrder::of(request.service, request.work_order_notes),
        )?;

        let scheduled_time = request.scheduled_time;
        let available = self
            .availability
            .is_available(scheduled_time, duration)
            .await
            .map_err(AppointmentError::from_port)?;
        ensure(available, || {
            AppointmentError::DateTimeUnavailable(format!(
                "Requested time {scheduled_time} for {duration} minutes is unavailable"
            ))
        })?;

        let appointment = Appointment::schedule(user_id, scheduled_time, duration, work_order);
        let event = persist(
            self.events.as_ref(),
            AppointmentScheduledEvent::new(appointment.to_dto()),
        )
        .await?;

        metrics::counter!("appointments_scheduled_total").increment(1);
        tracing::info!(appointment_id = %event.appointment.id, "appointment scheduled");
        Ok(event)
    }
}
