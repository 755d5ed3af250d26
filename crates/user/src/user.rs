//! User aggregate and value objects.

use std::fmt;

use common::{
    EmailAddress, Msisdn, NonEmptyString, SimpleType, ValidationError, ValidationErrors, zip4,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role a registered user acts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Parses a role name as sent by clients (`USER`, `Admin`, ...).
    pub fn parse(raw: &str) -> Result<Self, ValidationErrors> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(ValidationError::rejected(
                "Role",
                "value",
                &raw,
                "Must be one of USER, ADMIN",
            )
            .into()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated registration that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnregisteredUser {
    msisdn: Msisdn,
    email: EmailAddress,
    encrypted_password: NonEmptyString,
    role: Role,
}

impl UnregisteredUser {
    /// Validates every registration field, reporting all violations together.
    pub fn of(
        msisdn: String,
        email: String,
        encrypted_password: String,
        role: &str,
    ) -> Result<Self, ValidationErrors> {
        let (msisdn, email, encrypted_password, role) = zip4(
            Msisdn::of(msisdn),
            EmailAddress::of(email),
            NonEmptyString::of(encrypted_password),
            Role::parse(role),
        )?;

        Ok(Self {
            msisdn,
            email,
            encrypted_password,
            role,
        })
    }

    pub fn msisdn(&self) -> &Msisdn {
        &self.msisdn
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn encrypted_password(&self) -> &NonEmptyString {
        &self.encrypted_password
    }

    /// Assigns an identity, producing the user to persist.
    pub fn register(self) -> (User, NonEmptyString) {
        let user = User {
            id: UserId::new(),
            msisdn: self.msisdn,
            email: self.email,
            role: self.role,
        };
        (user, self.encrypted_password)
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    msisdn: Msisdn,
    email: EmailAddress,
    role: Role,
}

impl User {
    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn msisdn(&self) -> &Msisdn {
        &self.msisdn
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn to_dto(&self) -> UserDto {
        UserDto {
            id: self.id,
            msisdn: self.msisdn.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            msisdn: dto.msisdn,
            email: dto.email,
            role: dto.role,
        }
    }
}

/// Read-only snapshot of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: UserId,
    pub msisdn: Msisdn,
    pub email: EmailAddress,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("user").unwrap(), Role::User);
        assert_eq!(Role::parse(" ADMIN ").unwrap(), Role::Admin);

        let errors = Role::parse("ROOT").unwrap_err();
        assert_eq!(
            errors.messages(),
            vec!["'ROOT' of Role.value: Must be one of USER, ADMIN"]
        );
    }

    #[test]
    fn test_unregistered_user_accumulates_every_field() {
        let errors =
            UnregisteredUser::of("12".to_string(), String::new(), String::new(), "guest")
                .unwrap_err();

        // msisdn (1) + email (2) + password (1) + role (1)
        assert_eq!(errors.len(), 5);
        assert!(errors.messages()[0].contains("Msisdn.value"));
        assert!(errors.messages()[4].contains("Role.value"));
    }

    #[test]
    fn test_register_assigns_identity() {
        let unregistered = UnregisteredUser::of(
            "(212) 555-0147".to_string(),
            "ada@example.com".to_string(),
            "hash".to_string(),
            "USER",
        )
        .unwrap();

        let (user, password) = unregistered.register();
        assert_eq!(user.msisdn().as_str(), "+12125550147");
        assert_eq!(user.role(), Role::User);
        assert_eq!(password.as_str(), "hash");
        assert_eq!(User::from(user.to_dto()), user);
    }
}
