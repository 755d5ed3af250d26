//! Workflow registry and dispatch.
//!
//! The registry is assembled once by [`DispatcherBuilder`] and frozen into a
//! [`WorkflowDispatcher`]. After `build` nothing mutates it, so concurrent
//! dispatches only ever read from a plain map.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::effect::WorkflowFailure;
use crate::error::{ConfigurationError, DispatchError, RegistrationError, WorkflowError};
use crate::message::{Command, Query, Request, RequestKind};
use crate::workflow::Workflow;

type Handler<R> = Arc<dyn Workflow<Request = R>>;

/// Describes one registered workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerInfo {
    pub kind: RequestKind,
    pub request: &'static str,
    pub workflow: &'static str,
}

struct Registration {
    info: HandlerInfo,
    // Always a `Handler<R>` for the request type keyed by this entry.
    handler: Box<dyn Any + Send + Sync>,
}

/// Startup-time registry builder.
///
/// ```ignore
/// let dispatcher = DispatcherBuilder::new()
///     .register_command_handler(CompleteAppointmentWorkflow::new(find, events))?
///     .require_command::<CompleteAppointmentCommand>()
///     .build()?;
/// ```
#[derive(Default)]
pub struct DispatcherBuilder {
    handlers: HashMap<TypeId, Registration>,
    required: Vec<(TypeId, &'static str)>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the workflow handling command `W::Request`.
    ///
    /// Fails if a workflow is already registered for that command.
    pub fn register_command_handler<W>(self, workflow: W) -> Result<Self, RegistrationError>
    where
        W: Workflow,
        W::Request: Command,
    {
        self.register(RequestKind::Command, workflow)
    }

    /// Registers the workflow handling query `W::Request`.
    ///
    /// Fails if a workflow is already registered for that query.
    pub fn register_query_handler<W>(self, workflow: W) -> Result<Self, RegistrationError>
    where
        W: Workflow,
        W::Request: Query,
    {
        self.register(RequestKind::Query, workflow)
    }

    /// Declares that `build` must fail unless command `C` has a workflow.
    pub fn require_command<C: Command>(mut self) -> Self {
        self.required.push((TypeId::of::<C>(), C::NAME));
        self
    }

    /// Declares that `build` must fail unless query `Q` has a workflow.
    pub fn require_query<Q: Query>(mut self) -> Self {
        self.required.push((TypeId::of::<Q>(), Q::NAME));
        self
    }

    /// Freezes the registry.
    ///
    /// Every required request type without a workflow is reported at once.
    pub fn build(self) -> Result<WorkflowDispatcher, RegistrationError> {
        let mut missing: Vec<&'static str> = Vec::new();
        for (type_id, name) in &self.required {
            if !self.handlers.contains_key(type_id) && !missing.contains(name) {
                missing.push(*name);
            }
        }

        if !missing.is_empty() {
            return Err(RegistrationError::Missing { requests: missing });
        }

        tracing::info!(workflows = self.handlers.len(), "workflow registry built");

        Ok(WorkflowDispatcher {
            handlers: self.handlers,
        })
    }

    fn register<W: Workflow>(
        mut self,
        kind: RequestKind,
        workflow: W,
    ) -> Result<Self, RegistrationError> {
        let key = TypeId::of::<W::Request>();
        let request = <W::Request as Request>::NAME;

        if let Some(existing) = self.handlers.get(&key) {
            return Err(RegistrationError::Duplicate {
                request,
                existing: existing.info.workflow,
                rejected: type_name::<W>(),
            });
        }

        let handler: Handler<W::Request> = Arc::new(workflow);
        tracing::debug!(request, kind = %kind, workflow = type_name::<W>(), "workflow registered");

        self.handlers.insert(
            key,
            Registration {
                info: HandlerInfo {
                    kind,
                    request,
                    workflow: type_name::<W>(),
                },
                handler: Box::new(handler),
            },
        );
        Ok(self)
    }
}

/// Routes each request to its sole registered workflow.
pub struct WorkflowDispatcher {
    handlers: HashMap<TypeId, Registration>,
}

impl WorkflowDispatcher {
    /// Dispatches `request` to the workflow registered for its type.
    ///
    /// Unregistered request types fail with [`DispatchError::Unhandled`]; the
    /// condition is logged at error level and counted in
    /// `workflow_unhandled_total`.
    #[tracing::instrument(skip(self, request), fields(request = R::NAME))]
    pub async fn dispatch<R: Request>(
        &self,
        request: R,
    ) -> Result<R::Event, DispatchError<R::Error>> {
        let Some(workflow) = self.handler::<R>() else {
            tracing::error!(request = R::NAME, "no workflow registered for request");
            metrics::counter!("workflow_unhandled_total", "request" => R::NAME).increment(1);
            return Err(ConfigurationError { request: R::NAME }.into());
        };

        let started = Instant::now();
        let outcome = workflow.execute(request).await;
        metrics::histogram!("workflow_dispatch_duration_seconds", "request" => R::NAME)
            .record(started.elapsed().as_secs_f64());

        let label = match &outcome {
            Ok(_) => "ok",
            Err(WorkflowFailure::Rejected(error)) => {
                tracing::warn!(kind = %error.kind(), error = %error, "request rejected");
                "rejected"
            }
            Err(WorkflowFailure::Fault(error)) => {
                tracing::error!(error = %error, "request failed with a port fault");
                "fault"
            }
        };
        metrics::counter!("workflow_dispatch_total", "request" => R::NAME, "outcome" => label)
            .increment(1);

        outcome.map_err(DispatchError::from)
    }

    /// Returns true if a workflow is registered for `R`.
    pub fn handles<R: Request>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<R>())
    }

    /// Returns the number of registered workflows.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Lists registered workflows ordered by request name.
    pub fn registered(&self) -> Vec<&HandlerInfo> {
        let mut infos: Vec<&HandlerInfo> =
            self.handlers.values().map(|registration| &registration.info).collect();
        infos.sort_by_key(|info| info.request);
        infos
    }

    fn handler<R: Request>(&self) -> Option<&Handler<R>> {
        self.handlers
            .get(&TypeId::of::<R>())
            .and_then(|registration| registration.handler.downcast_ref::<Handler<R>>())
    }
}

impl fmt::Debug for WorkflowDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowDispatcher")
            .field("registered", &self.registered())
            .finish()
    }
}
