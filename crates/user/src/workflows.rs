//! User workflows and their registration.

use std::sync::Arc;

use async_trait::async_trait;
use common::run_as_superuser;
use workflow::{
    DispatcherBuilder, Outcome, RegistrationError, Workflow, WorkflowFailure, ensure_some, shift,
};

use crate::commands::{FindUserByEmailQuery, FindUserByMsisdnQuery, RegisterUserCommand};
use crate::error::UserError;
use crate::events::{UserFoundEvent, UserRegisteredEvent};
use crate::memory::{InMemoryUserStore, Sha256PasswordEncoder};
use crate::ports::{FindUserPort, PasswordEncoder, UserEventPort};
use crate::user::UnregisteredUser;

/// The ports every user workflow is built from.
#[derive(Clone)]
pub struct UserPorts {
    pub find: Arc<dyn FindUserPort>,
    pub events: Arc<dyn UserEventPort>,
    pub password_encoder: Arc<dyn PasswordEncoder>,
}

impl UserPorts {
    /// Wires every port to the in-memory store and the SHA-256 encoder.
    pub fn in_memory(store: InMemoryUserStore) -> Self {
        Self {
            find: Arc::new(store.clone()),
            events: Arc::new(store),
            password_encoder: Arc::new(Sha256PasswordEncoder),
        }
    }
}

/// Registers all user workflows and requires each request type to be handled.
pub fn register(
    builder: DispatcherBuilder,
    ports: &UserPorts,
) -> Result<DispatcherBuilder, RegistrationError> {
    Ok(builder
        .register_command_handler(RegisterUserWorkflow::new(
            Arc::clone(&ports.password_encoder),
            Arc::clone(&ports.find),
            Arc::clone(&ports.events),
        ))?
        .register_query_handler(FindUserByMsisdnWorkflow::new(Arc::clone(&ports.find)))?
        .register_query_handler(FindUserByEmailWorkflow::new(Arc::clone(&ports.find)))?
        .require_command::<RegisterUserCommand>()
        .require_query::<FindUserByMsisdnQuery>()
        .require_query::<FindUserByEmailQuery>())
}

/// Registers a new user.
///
/// The email is checked for an existing user before anything else; on a hit
/// the event port is never invoked. The write runs with a superuser context
/// derived from the caller's.
pub struct RegisterUserWorkflow {
    password_encoder: Arc<dyn PasswordEncoder>,
    find: Arc<dyn FindUserPort>,
    events: Arc<dyn UserEventPort>,
}

impl RegisterUserWorkflow {
    pub fn new(
        password_encoder: Arc<dyn PasswordEncoder>,
        find: Arc<dyn FindUserPort>,
        events: Arc<dyn UserEventPort>,
    ) -> Self {
        Self {
            password_encoder,
            find,
            events,
        }
    }

    async fn validate_new_user(
        &self,
        request: RegisterUserCommand,
    ) -> Result<UnregisteredUser, WorkflowFailure<UserError>> {
        let existing = self.find.find_user_by_email(&request.email).await?;
        if existing.is_some() {
            return shift(UserError::AlreadyExists(format!(
                "User {} exists",
                request.msisdn
            )));
        }

        let encrypted_password = self.password_encoder.encode(&request.password);
        Ok(UnregisteredUser::of(
            request.msisdn,
            request.email,
            encrypted_password,
            &request.role,
        )?)
    }
}

#[async_trait]
impl Workflow for RegisterUserWorkflow {
    type Request = RegisterUserCommand;

    #[tracing::instrument(skip(self, request), fields(caller = request.caller.principal()))]
    async fn execute(&self, request: RegisterUserCommand) -> Outcome<RegisterUserCommand> {
        let caller = request.caller.clone();
        let msisdn = request.msisdn.clone();
        let (user, encrypted_password) = self.validate_new_user(request).await?.register();

        let event = UserRegisteredEvent {
            user: user.to_dto(),
            encrypted_password: encrypted_password.into(),
        };
        let events = Arc::clone(&self.events);
        let stored = run_as_superuser(&caller, |elevated| async move {
            events.handle(event, &elevated).await
        })
        .await
        .map_err(|error| UserError::from_port(error, &msisdn))?;

        metrics::counter!("users_registered_total").increment(1);
        tracing::info!(user_id = %stored.user.id, "user registered");
        Ok(stored)
    }
}

/// Looks up a user by canonical phone number.
pub struct FindUserByMsisdnWorkflow {
    find: Arc<dyn FindUserPort>,
}

impl FindUserByMsisdnWorkflow {
    pub fn new(find: Arc<dyn FindUserPort>) -> Self {
        Self { find }
    }
}

#[async_trait]
impl Workflow for FindUserByMsisdnWorkflow {
    type Request = FindUserByMsisdnQuery;

    #[tracing::instrument(skip(self, request))]
    async fn execute(&self, request: FindUserByMsisdnQuery) -> Outcome<FindUserByMsisdnQuery> {
        let msisdn = request.msisdn.as_str();
        let found = self.find.find_user_by_msisdn(msisdn).await?;
        let user = ensure_some(found, || UserError::NotFound(msisdn.to_string()))?;

        Ok(UserFoundEvent {
            user: user.to_dto(),
        })
    }
}

/// Looks up a user by email address.
pub struct FindUserByEmailWorkflow {
    find: Arc<dyn FindUserPort>,
}

impl FindUserByEmailWorkflow {
    pub fn new(find: Arc<dyn FindUserPort>) -> Self {
        Self { find }
    }
}

#[async_trait]
impl Workflow for FindUserByEmailWorkflow {
    type Request = FindUserByEmailQuery;

    #[tracing::instrument(skip(self, request))]
    async fn execute(&self, request: FindUserByEmailQuery) -> Outcome<FindUserByEmailQuery> {
        let email = request.email.as_str();
        let found = self.find.find_user_by_email(email).await?;
        let user = ensure_some(found, || UserError::NotFound(email.to_string()))?;

        Ok(UserFoundEvent {
            user: user.to_dto(),
        })
    }
}
