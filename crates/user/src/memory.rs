//! In-memory adapters for the user ports.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::SecurityContext;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use uuid::Uuid;
use workflow::PortError;

use crate::events::UserRegisteredEvent;
use crate::ports::{FindUserPort, PasswordEncoder, UserEventPort};
use crate::user::{User, UserId};

#[derive(Debug)]
struct StoredUser {
    user: User,
    encrypted_password: String,
}

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<UserId, StoredUser>,
    handle_calls: usize,
}

/// In-memory user store for testing and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times the event port was invoked, accepted or not.
    pub async fn handle_calls(&self) -> usize {
        self.state.read().await.handle_calls
    }

    /// Returns the number of stored users.
    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }

    /// Returns the stored password encoding for `email`.
    pub async fn encrypted_password(&self, email: &str) -> Option<String> {
        self.state
            .read()
            .await
            .users
            .values()
            .find(|stored| stored.user.email().as_str() == email)
            .map(|stored| stored.encrypted_password.clone())
    }
}

#[async_trait]
impl FindUserPort for InMemoryUserStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, PortError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|stored| stored.user.email().as_str() == email)
            .map(|stored| stored.user.clone()))
    }

    async fn find_user_by_msisdn(&self, msisdn: &str) -> Result<Option<User>, PortError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|stored| stored.user.msisdn().as_str() == msisdn)
            .map(|stored| stored.user.clone()))
    }
}

#[async_trait]
impl UserEventPort for InMemoryUserStore {
    async fn handle(
        &self,
        event: UserRegisteredEvent,
        context: &SecurityContext,
    ) -> Result<UserRegisteredEvent, PortError> {
        let mut state = self.state.write().await;
        state.handle_calls += 1;

        if !context.is_superuser() {
            return Err(PortError::Unauthorized(format!(
                "{} may not register users",
                context.principal()
            )));
        }

        let taken = state
            .users
            .values()
            .filter(|stored| stored.user.email() == &event.user.email)
            .count() as u64;
        if taken > 0 {
            return Err(PortError::Conflict {
                resource: format!("User {}", event.user.email),
                expected: 0,
                actual: taken,
            });
        }

        state.users.insert(
            event.user.id,
            StoredUser {
                user: User::from(event.user.clone()),
                encrypted_password: event.encrypted_password.clone(),
            },
        );
        tracing::debug!(user_id = %event.user.id, "user stored");

        Ok(event)
    }
}

/// Salted SHA-256 password encoder for local runs and tests.
///
/// A single fast hash round is not a password hashing scheme; deployments
/// supply their own [`PasswordEncoder`]. Encodings have the form
/// `{salt}${hex digest}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256PasswordEncoder;

fn digest_hex(salt: &str, raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl PasswordEncoder for Sha256PasswordEncoder {
    fn encode(&self, raw: &str) -> String {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = digest_hex(&salt, raw);
        format!("{salt}${digest}")
    }

    fn matches(&self, raw: &str, encoded: &str) -> bool {
        match encoded.split_once('$') {
            Some((salt, digest)) => digest_hex(salt, raw) == digest,
            None => false,
        }
    }
}
