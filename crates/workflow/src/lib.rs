//! Typed request dispatch for business workflows.
//!
//! - [`message`]: the `Request`/`Command`/`Query`/`Event` taxonomy
//! - [`error`]: business error kinds, port faults and registry errors
//! - [`effect`]: the short-circuiting `Effect` context workflows run in
//! - [`dispatcher`]: the startup-built registry routing requests by type

pub mod dispatcher;
pub mod effect;
pub mod error;
pub mod message;
pub mod workflow;

pub use dispatcher::{DispatcherBuilder, HandlerInfo, WorkflowDispatcher};
pub use effect::{Effect, IntoEffect, WorkflowFailure, ensure, ensure_some, shift};
pub use error::{
    ConfigurationError, DispatchError, ErrorKind, PortError, RegistrationError, WorkflowError,
};
pub use message::{Command, Event, Query, Request, RequestKind};
pub use workflow::{Outcome, Workflow};
