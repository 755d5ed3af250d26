//! User events.

use serde::{Deserialize, Serialize};
use workflow::Event;

use crate::user::UserDto;

/// A user was registered.
///
/// Carries the encoded password for the persistence adapter; it is skipped
/// when the event is serialized for clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegisteredEvent {
    pub user: UserDto,
    #[serde(skip_serializing, default)]
    pub encrypted_password: String,
}

impl Event for UserRegisteredEvent {
    fn event_type(&self) -> &'static str {
        "UserRegistered"
    }
}

/// Result of a user lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFoundEvent {
    pub user: UserDto,
}

impl Event for UserFoundEvent {
    fn event_type(&self) -> &'static str {
        "UserFound"
    }
}
