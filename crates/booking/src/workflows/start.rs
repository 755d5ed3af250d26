use std::sync::Arc;

use async_trait::async_trait;
use workflow::{IntoEffect, Outcome, Workflow};

use super::{find_in_status, persist};
use crate::appointment::{AppointmentStartedEvent, AppointmentStatus, StartAppointmentCommand};
use crate::ports::{AppointmentEventPort, FindAppointmentPort};

/// Starts work on a scheduled appointment.
pub struct StartAppointmentWorkflow {
    find: Arc<dyn FindAppointmentPort>,
    events: Arc<dyn AppointmentEventPort>,
}

impl StartAppointmentWorkflow {
    pub fn new(find: Arc<dyn FindAppointmentPort>, events: Arc<dyn AppointmentEventPort>) -> Self {
        Self { find, events }
    }
}

#[async_trait]
impl Workflow for StartAppointmentWorkflow {
    type Request = StartAppointmentCommand;

    #[tracing::instrument(skip(self, request), fields(appointment_id = %request.appointment_id))]
    async fn execute(&self, request: StartAppointmentCommand) -> Outcome<StartAppointmentCommand> {
        let appointment = find_in_status(
            self.find.as_ref(),
            request.appointment_id,
            AppointmentStatus::Scheduled,
        )
        .await?;

        let started = appointment.start().into_effect()?;
        persist(
            self.events.as_ref(),
            AppointmentStartedEvent::new(started.to_dto()),
        )
        .await
    }
}
