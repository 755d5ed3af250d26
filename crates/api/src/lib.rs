//! HTTP adapter for the booking and user workflows.
//!
//! Every business endpoint translates its body into a request, dispatches it,
//! and maps the outcome to a status by error kind. Structured logging comes
//! from tracing, metrics from a Prometheus recorder.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use booking::{BookingPorts, InMemoryAppointmentStore, InMemoryPaymentMethods};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use user::{InMemoryUserStore, UserPorts};
use workflow::{DispatcherBuilder, RegistrationError};

use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/appointments", post(routes::appointments::schedule))
        .route("/appointments/{id}", get(routes::appointments::get))
        .route("/appointments/{id}/start", post(routes::appointments::start))
        .route(
            "/appointments/{id}/complete",
            post(routes::appointments::complete),
        )
        .route("/appointments/{id}/cancel", post(routes::appointments::cancel))
        .route("/appointments/{id}/pay", post(routes::appointments::pay))
        .route("/users", post(routes::users::register))
        .route("/users/msisdn/{msisdn}", get(routes::users::find_by_msisdn))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Handles to the in-memory adapters behind the default state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdapters {
    pub appointments: InMemoryAppointmentStore,
    pub payment_methods: InMemoryPaymentMethods,
    pub users: InMemoryUserStore,
}

/// Creates the default application state over in-memory adapters.
///
/// Fails if any workflow registration collides or a required request type is
/// left without a workflow.
pub fn create_default_state() -> Result<(Arc<AppState>, InMemoryAdapters), RegistrationError> {
    let adapters = InMemoryAdapters::default();
    let booking_ports = BookingPorts::in_memory(
        adapters.appointments.clone(),
        adapters.payment_methods.clone(),
    );
    let user_ports = UserPorts::in_memory(adapters.users.clone());

    let builder = booking::register(DispatcherBuilder::new(), &booking_ports)?;
    let dispatcher = user::register(builder, &user_ports)?.build()?;

    let state = Arc::new(AppState {
        dispatcher: Arc::new(dispatcher),
    });
    Ok((state, adapters))
}
