//! User commands and queries.

use common::{EmailAddress, Msisdn, SecurityContext};
use workflow::{Command, Query, Request};

use crate::error::UserError;
use crate::events::{UserFoundEvent, UserRegisteredEvent};

/// Command to register a new user.
///
/// Fields are raw caller input. The password is encoded before validation
/// and never appears in error messages.
#[derive(Clone)]
pub struct RegisterUserCommand {
    pub msisdn: String,
    pub email: String,
    pub password: String,
    pub role: String,
    /// Identity of the caller submitting the registration.
    pub caller: SecurityContext,
}

impl RegisterUserCommand {
    pub fn new(
        msisdn: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            msisdn: msisdn.into(),
            email: email.into(),
            password: password.into(),
            role: role.into(),
            caller: SecurityContext::anonymous(),
        }
    }

    /// Submits the registration on behalf of `caller`.
    pub fn as_caller(mut self, caller: SecurityContext) -> Self {
        self.caller = caller;
        self
    }
}

impl std::fmt::Debug for RegisterUserCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserCommand")
            .field("msisdn", &self.msisdn)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("caller", &self.caller.principal())
            .finish()
    }
}

impl Request for RegisterUserCommand {
    const NAME: &'static str = "RegisterUserCommand";
    type Event = UserRegisteredEvent;
    type Error = UserError;
}

impl Command for RegisterUserCommand {}

/// Query for a user by phone number.
#[derive(Debug, Clone)]
pub struct FindUserByMsisdnQuery {
    pub msisdn: Msisdn,
}

impl FindUserByMsisdnQuery {
    pub fn new(msisdn: Msisdn) -> Self {
        Self { msisdn }
    }
}

impl Request for FindUserByMsisdnQuery {
    const NAME: &'static str = "FindUserByMsisdnQuery";
    type Event = UserFoundEvent;
    type Error = UserError;
}

impl Query for FindUserByMsisdnQuery {}

/// Query for a user by email address.
#[derive(Debug, Clone)]
pub struct FindUserByEmailQuery {
    pub email: EmailAddress,
}

impl FindUserByEmailQuery {
    pub fn new(email: EmailAddress) -> Self {
        Self { email }
    }
}

impl Request for FindUserByEmailQuery {
    const NAME: &'static str = "FindUserByEmailQuery";
    type Event = UserFoundEvent;
    type Error = UserError;
}

impl Query for FindUserByEmailQuery {}
