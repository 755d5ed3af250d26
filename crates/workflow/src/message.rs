//! Message taxonomy: requests (commands and queries) and events.

use std::fmt;

use crate::error::WorkflowError;

/// Whether a request mutates or reads state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Command,
    Query,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Command => "command",
            RequestKind::Query => "query",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request routed to exactly one workflow by its concrete type.
///
/// The associated types fix, at the type level, which event a successful
/// execution yields and which closed error family a failed one reports.
pub trait Request: Send + Sync + fmt::Debug + 'static {
    /// Stable name used for logging, metrics and configuration errors.
    const NAME: &'static str;

    /// The event produced on success.
    type Event: Event;

    /// The business errors this request can fail with.
    type Error: WorkflowError;
}

/// A request expressing intent to mutate state.
pub trait Command: Request {}

/// A request expressing intent to read state.
pub trait Query: Request {}

/// The typed outcome of a successfully executed request.
pub trait Event: Send + Sync + fmt::Debug + 'static {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;
}
