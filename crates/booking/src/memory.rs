//! In-memory adapters for the appointment ports.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{NonEmptyString, PositiveLong};
use tokio::sync::RwLock;
use workflow::{Event, PortError};

use crate::appointment::{
    Appointment, AppointmentEvent, AppointmentId, AppointmentStatus, PaymentMethod,
};
use crate::ports::{AppointmentEventPort, AvailabilityPort, FindAppointmentPort, PaymentMethodPort};

#[derive(Debug, Default)]
struct StoreState {
    appointments: HashMap<AppointmentId, Appointment>,
    handled: Vec<&'static str>,
    offline: bool,
}

/// In-memory appointment store for testing and local runs.
///
/// Implements the read, event and availability ports over one map. Writes
/// are checked against the stored version: a snapshot must carry exactly the
/// stored version plus one. A scheduled snapshot is also rejected as a
/// conflict when its slot overlaps one already held, checked under the same
/// write lock as the insert.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAppointmentStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryAppointmentStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent port call fail as unavailable.
    pub async fn set_offline(&self, offline: bool) {
        self.state.write().await.offline = offline;
    }

    /// Returns the event types accepted by `handle`, oldest first.
    pub async fn handled_events(&self) -> Vec<&'static str> {
        self.state.read().await.handled.clone()
    }

    /// Returns the number of stored appointments.
    pub async fn appointment_count(&self) -> usize {
        self.state.read().await.appointments.len()
    }
}

fn check_online(state: &StoreState) -> Result<(), PortError> {
    if state.offline {
        return Err(PortError::Unavailable(
            "appointment store is offline".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl FindAppointmentPort for InMemoryAppointmentStore {
    async fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>, PortError> {
        let state = self.state.read().await;
        check_online(&state)?;
        Ok(state.appointments.get(&id).cloned())
    }

    async fn find_by_id_in_state(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, PortError> {
        let state = self.state.read().await;
        check_online(&state)?;
        Ok(state
            .appointments
            .get(&id)
            .filter(|appointment| appointment.status() == status)
            .cloned())
    }
}

#[async_trait]
impl AppointmentEventPort for InMemoryAppointmentStore {
    async fn handle(&self, event: AppointmentEvent) -> Result<AppointmentEvent, PortError> {
        let mut state = self.state.write().await;
        check_online(&state)?;

        let snapshot = event.appointment();
        let stored_version = state
            .appointments
            .get(&snapshot.id)
            .map(Appointment::version)
            .unwrap_or(0);

        if snapshot.version != stored_version + 1 {
            return Err(PortError::Conflict {
                resource: format!("Appointment {}", snapshot.id),
                expected: snapshot.version.saturating_sub(1),
                actual: stored_version,
            });
        }

        if matches!(event, AppointmentEvent::AppointmentScheduled(_)) {
            let overlapping = state
                .appointments
                .values()
                .filter(|appointment| {
                    appointment.id() != snapshot.id
                        && appointment.status().holds_slot()
                        && appointment.overlaps(snapshot.scheduled_time, snapshot.duration)
                })
                .count() as u64;
            if overlapping > 0 {
                return Err(PortError::Conflict {
                    resource: format!(
                        "slot at {} for {} minutes",
                        snapshot.scheduled_time, snapshot.duration
                    ),
                    expected: 0,
                    actual: overlapping,
                });
            }
        }

        state
            .appointments
            .insert(snapshot.id, Appointment::from(snapshot.clone()));
        state.handled.push(event.event_type());
        tracing::debug!(
            appointment_id = %snapshot.id,
            event_type = event.event_type(),
            version = snapshot.version,
            "appointment event stored"
        );

        Ok(event)
    }
}

#[async_trait]
impl AvailabilityPort for InMemoryAppointmentStore {
    async fn is_available(
        &self,
        start: DateTime<Utc>,
        duration: PositiveLong,
    ) -> Result<bool, PortError> {
        let state = self.state.read().await;
        check_online(&state)?;
        Ok(!state.appointments.values().any(|appointment| {
            appointment.status().holds_slot() && appointment.overlaps(start, duration)
        }))
    }
}

/// In-memory payment method registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentMethods {
    methods: Arc<RwLock<HashMap<String, PaymentMethod>>>,
}

impl InMemoryPaymentMethods {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores or replaces a payment method.
    pub async fn add(&self, method: PaymentMethod) {
        self.methods.write().await.insert(method.id.clone(), method);
    }
}

#[async_trait]
impl PaymentMethodPort for InMemoryPaymentMethods {
    async fn find_payment_method(
        &self,
        user_id: &NonEmptyString,
        payment_method_id: &str,
    ) -> Result<Option<PaymentMethod>, PortError> {
        let methods = self.methods.read().await;
        Ok(methods
            .get(payment_method_id)
            .filter(|method| &method.user_id == user_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use common::SimpleType;

    use super::*;
    use crate::appointment::{AppointmentScheduledEvent, AppointmentStartedEvent, WorkOrder};

    fn scheduled_at(hour: u32) -> Appointment {
        Appointment::schedule(
            NonEmptyString::of("user-1".to_string()).unwrap(),
            Utc.with_ymd_and_hms(2030, 1, 15, hour, 0, 0).unwrap(),
            PositiveLong::of(60).unwrap(),
            WorkOrder::of("Inspection".to_string(), None).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_handle_and_find() {
        let store = InMemoryAppointmentStore::new();
        let appointment = scheduled_at(9);
        let id = appointment.id();

        store
            .handle(AppointmentScheduledEvent::new(appointment.to_dto()).into())
            .await
            .unwrap();

        assert!(store.find_by_id(id).await.unwrap().is_some());
        assert!(
            store
                .find_by_id_in_state(id, AppointmentStatus::Scheduled)
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            store
                .find_by_id_in_state(id, AppointmentStatus::InProgress)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(store.handled_events().await, vec!["AppointmentScheduled"]);
    }

    #[tokio::test]
    async fn test_stale_write_conflicts() {
        let store = InMemoryAppointmentStore::new();
        let appointment = scheduled_at(9);
        store
            .handle(AppointmentScheduledEvent::new(appointment.to_dto()).into())
            .await
            .unwrap();

        let started = appointment.start().unwrap();
        store
            .handle(AppointmentStartedEvent::new(started.to_dto()).into())
            .await
            .unwrap();
        let replay = store
            .handle(AppointmentStartedEvent::new(started.to_dto()).into())
            .await;

        assert!(matches!(
            replay,
            Err(PortError::Conflict {
                expected: 1,
                actual: 2,
                ..
            })
        ));
        assert_eq!(store.handled_events().await.len(), 2);
    }

    #[tokio::test]
    async fn test_overlapping_schedule_conflicts_after_stale_availability() {
        let store = InMemoryAppointmentStore::new();
        let first = scheduled_at(9);
        let second = scheduled_at(9);
        let hour = PositiveLong::of(60).unwrap();

        assert!(store.is_available(first.scheduled_time(), hour).await.unwrap());
        assert!(store.is_available(second.scheduled_time(), hour).await.unwrap());

        store
            .handle(AppointmentScheduledEvent::new(first.to_dto()).into())
            .await
            .unwrap();
        let result = store
            .handle(AppointmentScheduledEvent::new(second.to_dto()).into())
            .await;

        assert!(matches!(
            result,
            Err(PortError::Conflict {
                expected: 0,
                actual: 1,
                ..
            })
        ));
        assert_eq!(store.appointment_count().await, 1);
    }

    #[tokio::test]
    async fn test_availability_ignores_finished_appointments() {
        let store = InMemoryAppointmentStore::new();
        let appointment = scheduled_at(9);
        let start = appointment.scheduled_time();
        store
            .handle(AppointmentScheduledEvent::new(appointment.to_dto()).into())
            .await
            .unwrap();

        let half_hour = PositiveLong::of(30).unwrap();
        assert!(!store.is_available(start, half_hour).await.unwrap());
        assert!(
            store
                .is_available(start + TimeDelta::hours(1), half_hour)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_offline_store_is_unavailable() {
        let store = InMemoryAppointmentStore::new();
        store.set_offline(true).await;

        let result = store.find_by_id(AppointmentId::new()).await;
        assert!(matches!(result, Err(PortError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_payment_method_scoped_to_owner() {
        let methods = InMemoryPaymentMethods::new();
        let owner = NonEmptyString::of("user-1".to_string()).unwrap();
        let stranger = NonEmptyString::of("user-2".to_string()).unwrap();
        methods.add(PaymentMethod::new("pm-1", owner.clone())).await;

        assert!(methods.find_payment_method(&owner, "pm-1").await.unwrap().is_some());
        assert!(methods.find_payment_method(&stranger, "pm-1").await.unwrap().is_none());
    }
}
