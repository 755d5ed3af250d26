//! Prometheus metrics endpoint and metric descriptions.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusHandle;

/// Registers help text for the metrics emitted by the dispatcher and
/// workflows. Call once after the recorder is installed.
pub fn describe() {
    describe_counter!(
        "workflow_dispatch_total",
        "Dispatched requests by request type and outcome"
    );
    describe_counter!(
        "workflow_unhandled_total",
        "Requests dispatched without a registered workflow"
    );
    describe_histogram!(
        "workflow_dispatch_duration_seconds",
        metrics::Unit::Seconds,
        "Time spent executing a workflow"
    );
    describe_counter!("appointments_scheduled_total", "Appointments booked");
    describe_counter!("appointments_paid_total", "Appointments paid");
    describe_counter!("users_registered_total", "Users registered");
}

/// GET /metrics: returns Prometheus-formatted metrics.
pub async fn get(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        handle.render(),
    )
}
