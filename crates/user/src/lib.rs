//! User registration and lookup on top of the workflow dispatch core.

pub mod commands;
pub mod error;
pub mod events;
pub mod memory;
pub mod ports;
pub mod user;
pub mod workflows;

pub use commands::{FindUserByEmailQuery, FindUserByMsisdnQuery, RegisterUserCommand};
pub use error::UserError;
pub use events::{UserFoundEvent, UserRegisteredEvent};
pub use memory::{InMemoryUserStore, Sha256PasswordEncoder};
pub use ports::{FindUserPort, PasswordEncoder, UserEventPort};
pub use user::{Role, UnregisteredUser, User, UserDto, UserId};
pub use workflows::{
    FindUserByEmailWorkflow, FindUserByMsisdnWorkflow, RegisterUserWorkflow, UserPorts, register,
};
