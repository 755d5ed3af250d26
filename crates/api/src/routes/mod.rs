//! HTTP route handlers.

pub mod appointments;
pub mod health;
pub mod metrics;
pub mod users;

use std::sync::Arc;

use workflow::WorkflowDispatcher;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub dispatcher: Arc<WorkflowDispatcher>,
}
