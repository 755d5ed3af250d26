//! Outbound ports the user workflows depend on.

use async_trait::async_trait;
use common::SecurityContext;
use workflow::PortError;

use crate::events::UserRegisteredEvent;
use crate::user::User;

/// Reads users by their natural keys.
#[async_trait]
pub trait FindUserPort: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, PortError>;

    async fn find_user_by_msisdn(&self, msisdn: &str) -> Result<Option<User>, PortError>;
}

/// Persists user events.
///
/// Writes require a superuser context and fail with
/// [`PortError::Unauthorized`] otherwise. A duplicate email is reported as
/// [`PortError::Conflict`].
#[async_trait]
pub trait UserEventPort: Send + Sync {
    async fn handle(
        &self,
        event: UserRegisteredEvent,
        context: &SecurityContext,
    ) -> Result<UserRegisteredEvent, PortError>;
}

/// One-way password encoding.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, raw: &str) -> String;

    /// Returns true if `raw` encodes to `encoded`.
    fn matches(&self, raw: &str, encoded: &str) -> bool;
}
