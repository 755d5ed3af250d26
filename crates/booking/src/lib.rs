//! Appointment booking on top of the workflow dispatch core.
//!
//! This crate provides:
//! - The `Appointment` aggregate and its status state machine
//! - Commands, queries, events and the closed `AppointmentError` family
//! - Outbound ports plus in-memory adapters
//! - One workflow per request type and a `register` routine wiring them

pub mod appointment;
pub mod memory;
pub mod ports;
pub mod workflows;

pub use appointment::{
    Appointment, AppointmentCancelledEvent, AppointmentCompletedEvent, AppointmentDto,
    AppointmentError, AppointmentEvent, AppointmentFoundEvent, AppointmentId,
    AppointmentPaidEvent, AppointmentScheduledEvent, AppointmentStartedEvent, AppointmentStatus,
    CancelAppointmentCommand, CompleteAppointmentCommand, FindAppointmentQuery,
    PayAppointmentCommand, PaymentMethod, ScheduleAppointmentCommand, StartAppointmentCommand,
    WorkOrder,
};
pub use memory::{InMemoryAppointmentStore, InMemoryPaymentMethods};
pub use ports::{AppointmentEventPort, AvailabilityPort, FindAppointmentPort, PaymentMethodPort};
pub use workflows::{
    BookingPorts, CancelAppointmentWorkflow, CompleteAppointmentWorkflow,
    FindAppointmentWorkflow, PayAppointmentWorkflow, ScheduleAppointmentWorkflow,
    StartAppointmentWorkflow, register,
};
