//! Appointment aggregate and related types.

mod aggregate;
mod commands;
mod error;
mod events;
mod state;
mod value_objects;

pub use aggregate::{Appointment, AppointmentDto};
pub use commands::*;
pub use error::AppointmentError;
pub use events::{
    AppointmentCancelledEvent, AppointmentCompletedEvent, AppointmentEvent,
    AppointmentFoundEvent, AppointmentPaidEvent, AppointmentScheduledEvent,
    AppointmentStartedEvent,
};
pub use state::AppointmentStatus;
pub use value_objects::{AppointmentId, PaymentMethod, WorkOrder};
