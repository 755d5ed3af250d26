use std::sync::Arc;

use async_trait::async_trait;
use workflow::{IntoEffect, Outcome, Workflow};

use super::{find_in_status, persist};
use crate::appointment::{
    AppointmentCompletedEvent, AppointmentStatus, CompleteAppointmentCommand,
};
use crate::ports::{AppointmentEventPort, FindAppointmentPort};

/// Completes an appointment that is in progress.
///
/// Notes supplied with the command are recorded verbatim.
pub struct CompleteAppointmentWorkflow {
    find: Arc<dyn FindAppointmentPort>,
    events: Arc<dyn AppointmentEventPort>,
}

impl CompleteAppointmentWorkflow {
    pub fn new(find: Arc<dyn FindAppointmentPort>, events: Arc<dyn AppointmentEventPort>) -> Self {
        Self { find, events }
    }
}

#[async_trait]
impl Workflow for CompleteAppointmentWorkflow {
    type Request = CompleteAppointmentCommand;

    #[tracing::instrument(skip(self, request), fields(appointment_id = %request.appointment_id))]
    async fn execute(
        &self,
        request: CompleteAppointmentCommand,
    ) -> Outcome<CompleteAppointmentCommand> {
        let appointment = find_in_status(
            self.find.as_ref(),
            request.appointment_id,
            AppointmentStatus::InProgress,
        )
        .await?;

        let completed = appointment.complete(request.notes).into_effect()?;
        persist(
            self.events.as_ref(),
            AppointmentCompletedEvent::new(completed.to_dto()),
        )
        .await
    }
}
