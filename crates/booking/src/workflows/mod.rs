//! Appointment workflows and their registration.

mod cancel;
mod complete;
mod find;
mod pay;
mod schedule;
mod start;

use std::sync::Arc;

use workflow::{DispatcherBuilder, Effect, PortError, RegistrationError, WorkflowFailure, shift};

use crate::appointment::{
    Appointment, AppointmentError, AppointmentEvent, AppointmentId, AppointmentStatus,
    CancelAppointmentCommand, CompleteAppointmentCommand, FindAppointmentQuery,
    PayAppointmentCommand, ScheduleAppointmentCommand, StartAppointmentCommand,
};
use crate::memory::{InMemoryAppointmentStore, InMemoryPaymentMethods};
use crate::ports::{AppointmentEventPort, AvailabilityPort, FindAppointmentPort, PaymentMethodPort};

pub use cancel::CancelAppointmentWorkflow;
pub use complete::CompleteAppointmentWorkflow;
pub use find::FindAppointmentWorkflow;
pub use pay::PayAppointmentWorkflow;
pub use schedule::ScheduleAppointmentWorkflow;
pub use start::StartAppointmentWorkflow;

/// The ports every appointment workflow is built from.
#[derive(Clone)]
pub struct BookingPorts {
    pub find: Arc<dyn FindAppointmentPort>,
    pub events: Arc<dyn AppointmentEventPort>,
    pub availability: Arc<dyn AvailabilityPort>,
    pub payment_methods: Arc<dyn PaymentMethodPort>,
}

impl BookingPorts {
    /// Wires every port to the in-memory adapters.
    pub fn in_memory(
        store: InMemoryAppointmentStore,
        payment_methods: InMemoryPaymentMethods,
    ) -> Self {
        Self {
            find: Arc::new(store.clone()),
            events: Arc::new(store.clone()),
            availability: Arc::new(store),
            payment_methods: Arc::new(payment_methods),
        }
    }
}

/// Registers all appointment workflows and requires each request type to be
/// handled.
pub fn register(
    builder: DispatcherBuilder,
    ports: &BookingPorts,
) -> Result<DispatcherBuilder, RegistrationError> {
    Ok(builder
        .register_command_handler(ScheduleAppointmentWorkflow::new(
            Arc::clone(&ports.availability),
            Arc::clone(&ports.events),
        ))?
        .register_command_handler(StartAppointmentWorkflow::new(
            Arc::clone(&ports.find),
            Arc::clone(&ports.events),
        ))?
        .register_command_handler(CompleteAppointmentWorkflow::new(
            Arc::clone(&ports.find),
            Arc::clone(&ports.events),
        ))?
        .register_command_handler(CancelAppointmentWorkflow::new(
            Arc::clone(&ports.find),
            Arc::clone(&ports.events),
        ))?
        .register_command_handler(PayAppointmentWorkflow::new(
            Arc::clone(&ports.find),
            Arc::clone(&ports.payment_methods),
            Arc::clone(&ports.events),
        ))?
        .register_query_handler(FindAppointmentWorkflow::new(Arc::clone(&ports.find)))?
        .require_command::<ScheduleAppointmentCommand>()
        .require_command::<StartAppointmentCommand>()
        .require_command::<CompleteAppointmentCommand>()
        .require_command::<CancelAppointmentCommand>()
        .require_command::<PayAppointmentCommand>()
        .require_query::<FindAppointmentQuery>())
}

/// Loads the appointment only if it is in `expected` status.
///
/// An appointment in a terminal status is rejected as a conflict; any other
/// mismatch is reported as not found, naming the expected status.
async fn find_in_status(
    port: &dyn FindAppointmentPort,
    id: AppointmentId,
    expected: AppointmentStatus,
) -> Effect<Appointment, AppointmentError> {
    let found = port
        .find_by_id_in_state(id, expected)
        .await
        .map_err(AppointmentError::from_port)?;
    if let Some(appointment) = found {
        return Ok(appointment);
    }

    match port.find_by_id(id).await.map_err(AppointmentError::from_port)? {
        Some(appointment) if appointment.status().is_terminal() => {
            shift(AppointmentError::TransitionRejected {
                id,
                status: appointment.status(),
            })
        }
        _ => shift(AppointmentError::NotInStatus { id, expected }),
    }
}

/// Hands a fully built event to the event port and returns what it stored.
async fn persist<E>(port: &dyn AppointmentEventPort, event: E) -> Effect<E, AppointmentError>
where
    E: Into<AppointmentEvent> + TryFrom<AppointmentEvent, Error = PortError>,
{
    let stored = port
        .handle(event.into())
        .await
        .map_err(AppointmentError::from_port)?;
    E::try_from(stored).map_err(WorkflowFailure::Fault)
}
