//! Appointment events.

use serde::{Deserialize, Serialize};
use workflow::{Event, PortError};

use super::AppointmentDto;

macro_rules! appointment_event {
    ($(#[$meta:meta])* $name:ident, $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            pub appointment: AppointmentDto,
        }

        impl $name {
            pub fn new(appointment: AppointmentDto) -> Self {
                Self { appointment }
            }
        }

        impl Event for $name {
            fn event_type(&self) -> &'static str {
                stringify!($variant)
            }
        }

        impl From<$name> for AppointmentEvent {
            fn from(event: $name) -> Self {
                AppointmentEvent::$variant(event)
            }
        }

        impl TryFrom<AppointmentEvent> for $name {
            type Error = PortError;

            fn try_from(event: AppointmentEvent) -> Result<Self, Self::Error> {
                match event {
                    AppointmentEvent::$variant(inner) => Ok(inner),
                    other => Err(PortError::Backend(format!(
                        "event port answered {} to {}",
                        other.event_type(),
                        stringify!($variant)
                    ))),
                }
            }
        }
    };
}

/// Events persisted through the appointment event port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AppointmentEvent {
    AppointmentScheduled(AppointmentScheduledEvent),
    AppointmentStarted(AppointmentStartedEvent),
    AppointmentCompleted(AppointmentCompletedEvent),
    AppointmentCancelled(AppointmentCancelledEvent),
    AppointmentPaid(AppointmentPaidEvent),
}

impl AppointmentEvent {
    /// Returns the snapshot carried by the event.
    pub fn appointment(&self) -> &AppointmentDto {
        match self {
            AppointmentEvent::AppointmentScheduled(event) => &event.appointment,
            AppointmentEvent::AppointmentStarted(event) => &event.appointment,
            AppointmentEvent::AppointmentCompleted(event) => &event.appointment,
            AppointmentEvent::AppointmentCancelled(event) => &event.appointment,
            AppointmentEvent::AppointmentPaid(event) => &event.appointment,
        }
    }
}

impl Event for AppointmentEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AppointmentEvent::AppointmentScheduled(event) => event.event_type(),
            AppointmentEvent::AppointmentStarted(event) => event.event_type(),
            AppointmentEvent::AppointmentCompleted(event) => event.event_type(),
            AppointmentEvent::AppointmentCancelled(event) => event.event_type(),
            AppointmentEvent::AppointmentPaid(event) => event.event_type(),
        }
    }
}

appointment_event!(
    /// An appointment was booked.
    AppointmentScheduledEvent,
    AppointmentScheduled
);
appointment_event!(
    /// Work on an appointment started.
    AppointmentStartedEvent,
    AppointmentStarted
);
appointment_event!(
    /// An appointment was completed.
    AppointmentCompletedEvent,
    AppointmentCompleted
);
appointment_event!(
    /// An appointment was cancelled.
    AppointmentCancelledEvent,
    AppointmentCancelled
);
appointment_event!(
    /// An appointment was paid.
    AppointmentPaidEvent,
    AppointmentPaid
);

/// Result of an appointment lookup. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentFoundEvent {
    pub appointment: AppointmentDto,
}

impl Event for AppointmentFoundEvent {
    fn event_type(&self) -> &'static str {
        "AppointmentFound"
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use common::{NonEmptyString, PositiveLong, SimpleType};

    use super::*;
    use crate::appointment::{Appointment, WorkOrder};

    fn dto() -> AppointmentDto {
        Appointment::schedule(
            NonEmptyString::of("user-1".to_string()).unwrap(),
            Utc.with_ymd_and_hms(2030, 1, 15, 9, 0, 0).unwrap(),
            PositiveLong::of(30).unwrap(),
            WorkOrder::of("Inspection".to_string(), None).unwrap(),
        )
        .to_dto()
    }

    #[test]
    fn test_event_types() {
        let event: AppointmentEvent = AppointmentStartedEvent::new(dto()).into();
        assert_eq!(event.event_type(), "AppointmentStarted");
    }

    #[test]
    fn test_try_from_rejects_other_variant() {
        let event: AppointmentEvent = AppointmentStartedEvent::new(dto()).into();
        let result = AppointmentCompletedEvent::try_from(event);
        assert!(matches!(result, Err(PortError::Backend(_))));
    }

    #[test]
    fn test_serialized_shape() {
        let event: AppointmentEvent = AppointmentScheduledEvent::new(dto()).into();
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "AppointmentScheduled");
        assert_eq!(json["data"]["appointment"]["status"], "Scheduled");
        assert_eq!(json["data"]["appointment"]["duration"], 30);
        assert_eq!(
            json["data"]["appointment"]["work_order"]["service"],
            "Inspection"
        );
    }
}
