use std::sync::Arc;

use async_trait::async_trait;
use workflow::{Outcome, Workflow, ensure_some};

use crate::appointment::{AppointmentError, AppointmentFoundEvent, FindAppointmentQuery};
use crate::ports::FindAppointmentPort;

/// Looks up an appointment in any status.
pub struct FindAppointmentWorkflow {
    find: Arc<dyn FindAppointmentPort>,
}

impl FindAppointmentWorkflow {
    pub fn new(find: Arc<dyn FindAppointmentPort>) -> Self {
        Self { find }
    }
}

#[async_trait]
impl Workflow for FindAppointmentWorkflow {
    type Request = FindAppointmentQuery;

    #[tracing::instrument(skip(self, request), fields(appointment_id = %request.appointment_id))]
    async fn execute(&self, request: FindAppointmentQuery) -> Outcome<FindAppointmentQuery> {
        let id = request.appointment_id;
        let found = self
            .find
            .find_by_id(id)
            .await
            .map_err(AppointmentError::from_port)?;
        let appointment = ensure_some(found, || AppointmentError::NotFound(id))?;

        Ok(AppointmentFoundEvent {
            appointment: appointment.to_dto(),
        })
    }
}
