use std::sync::Arc;

use async_trait::async_trait;
use workflow::{IntoEffect, Outcome, Workflow, ensure, ensure_some};

use super::{find_in_status, persist};
use crate::appointment::{
    AppointmentError, AppointmentPaidEvent, AppointmentStatus, PayAppointmentCommand,
};
use crate::ports::{AppointmentEventPort, FindAppointmentPort, PaymentMethodPort};

/// Pays for a completed appointment with one of the owner's payment methods.
pub struct PayAppointmentWorkflow {
    find: Arc<dyn FindAppointmentPort>,
    payment_methods: Arc<dyn PaymentMethodPort>,
    events: Arc<dyn AppointmentEventPort>,
}

impl PayAppointmentWorkflow {
    pub fn new(
        find: Arc<dyn FindAppointmentPort>,
        payment_methods: Arc<dyn PaymentMethodPort>,
        events: Arc<dyn AppointmentEventPort>,
    ) -> Self {
        Self {
            find,
            payment_methods,
            events,
        }
    }
}

#[async_trait]
impl Workflow for PayAppointmentWorkflow {
    type Request = PayAppointmentCommand;

    #[tracing::instrument(skip(self, request), fields(appointment_id = %request.appointment_id))]
    async fn execute(&self, request: PayAppointmentCommand) -> Outcome<PayAppointmentCommand> {
        let appointment = find_in_status(
            self.find.as_ref(),
            request.appointment_id,
            AppointmentStatus::Completed,
        )
        .await?;

        let payment_method_id = request.payment_method_id;
        let found = self
            .payment_methods
            .find_payment_method(appointment.user_id(), &payment_method_id)
            .await
            .map_err(AppointmentError::from_port)?;
        let method = ensure_some(found, || {
            AppointmentError::Payment(format!(
                "Payment method {payment_method_id} not found for user {}",
                appointment.user_id()
            ))
        })?;
        ensure(method.active, || {
            AppointmentError::Payment(format!("Payment method {payment_method_id} is not active"))
        })?;

        let paid = appointment.pay(method.id).into_effect()?;
        let event = persist(self.events.as_ref(), AppointmentPaidEvent::new(paid.to_dto())).await?;

        metrics::counter!("appointments_paid_total").increment(1);
        Ok(event)
    }
}
