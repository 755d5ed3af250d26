//! The single-operation handler abstraction.

use async_trait::async_trait;

use crate::effect::Effect;
use crate::message::Request;

/// Result of executing a workflow for request `R`.
pub type Outcome<R> = Effect<<R as Request>::Event, <R as Request>::Error>;

/// Handles exactly one request type.
///
/// Implementations hold no mutable state between invocations and may be
/// executed concurrently for different requests. When `execute` fails, no
/// output port has been invoked with a partially built event.
#[async_trait]
pub trait Workflow: Send + Sync + 'static {
    /// The request type this workflow is bound to.
    type Request: Request;

    /// Executes the request, yielding its event or the first failure.
    async fn execute(&self, request: Self::Request) -> Outcome<Self::Request>;
}
