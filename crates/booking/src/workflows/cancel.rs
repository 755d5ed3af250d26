use std::sync::Arc;

use async_trait::async_trait;
use workflow::{IntoEffect, Outcome, Workflow, ensure_some};

use super::persist;
use crate::appointment::{AppointmentCancelledEvent, AppointmentError, CancelAppointmentCommand};
use crate::ports::{AppointmentEventPort, FindAppointmentPort};

/// Cancels an appointment that has not been completed.
pub struct CancelAppointmentWorkflow {
    find: Arc<dyn FindAppointmentPort>,
    events: Arc<dyn AppointmentEventPort>,
}

impl CancelAppointmentWorkflow {
    pub fn new(find: Arc<dyn FindAppointmentPort>, events: Arc<dyn AppointmentEventPort>) -> Self {
        Self { find, events }
    }
}

#[async_trait]
impl Workflow for CancelAppointmentWorkflow {
    type Request = CancelAppointmentCommand;

    #[tracing::instrument(skip(self, request), fields(appointment_id = %request.appointment_id))]
    async fn execute(
        &self,
        request: CancelAppointmentCommand,
    ) -> Outcome<CancelAppointmentCommand> {
        let id = request.appointment_id;
        let found = self
            .find
            .find_by_id(id)
            .await
            .map_err(AppointmentError::from_port)?;
        let appointment = ensure_some(found, || AppointmentError::NotFound(id))?;

        let cancelled = appointment.cancel(request.notes).into_effect()?;
        persist(
            self.events.as_ref(),
            AppointmentCancelledEvent::new(cancelled.to_dto()),
        )
        .await
    }
}
