//! Appointment endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use booking::{
    AppointmentDto, AppointmentId, CancelAppointmentCommand, CompleteAppointmentCommand,
    FindAppointmentQuery, PayAppointmentCommand, ScheduleAppointmentCommand,
    StartAppointmentCommand,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use workflow::Event;

use super::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct ScheduleAppointmentRequest {
    pub user_id: String,
    pub scheduled_time: DateTime<Utc>,
    /// Minutes.
    pub duration: i64,
    pub service: String,
    #[serde(default)]
    pub work_order_notes: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct NotesRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct PayAppointmentRequest {
    pub payment_method_id: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct AppointmentEventResponse {
    pub event: &'static str,
    pub appointment: AppointmentDto,
}

impl AppointmentEventResponse {
    fn of(event: &impl Event, appointment: AppointmentDto) -> Json<Self> {
        Json(Self {
            event: event.event_type(),
            appointment,
        })
    }
}

// -- Handlers --

/// POST /appointments: book a slot.
#[tracing::instrument(skip(state, req))]
pub async fn schedule(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScheduleAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentEventResponse>), ApiError> {
    let mut command =
        ScheduleAppointmentCommand::new(req.user_id, req.scheduled_time, req.duration, req.service);
    if let Some(notes) = req.work_order_notes {
        command = command.with_work_order_notes(notes);
    }

    let event = state.dispatcher.dispatch(command).await?;
    let appointment = event.appointment.clone();
    Ok((
        StatusCode::CREATED,
        AppointmentEventResponse::of(&event, appointment),
    ))
}

/// GET /appointments/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AppointmentDto>, ApiError> {
    let id = AppointmentId::parse(&id)?;
    let found = state
        .dispatcher
        .dispatch(FindAppointmentQuery::new(id))
        .await?;
    Ok(Json(found.appointment))
}

/// POST /appointments/{id}/start
#[tracing::instrument(skip(state))]
pub async fn start(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AppointmentEventResponse>, ApiError> {
    let id = AppointmentId::parse(&id)?;
    let event = state
        .dispatcher
        .dispatch(StartAppointmentCommand::new(id))
        .await?;
    let appointment = event.appointment.clone();
    Ok(AppointmentEventResponse::of(&event, appointment))
}

/// POST /appointments/{id}/complete
#[tracing::instrument(skip(state, req))]
pub async fn complete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<NotesRequest>,
) -> Result<Json<AppointmentEventResponse>, ApiError> {
    let id = AppointmentId::parse(&id)?;
    let event = state
        .dispatcher
        .dispatch(CompleteAppointmentCommand::new(id, req.notes))
        .await?;
    let appointment = event.appointment.clone();
    Ok(AppointmentEventResponse::of(&event, appointment))
}

/// POST /appointments/{id}/cancel
#[tracing::instrument(skip(state, req))]
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<NotesRequest>,
) -> Result<Json<AppointmentEventResponse>, ApiError> {
    let id = AppointmentId::parse(&id)?;
    let event = state
        .dispatcher
        .dispatch(CancelAppointmentCommand::new(id, req.notes))
        .await?;
    let appointment = event.appointment.clone();
    Ok(AppointmentEventResponse::of(&event, appointment))
}

/// POST /appointments/{id}/pay
#[tracing::instrument(skip(state, req))]
pub async fn pay(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<PayAppointmentRequest>,
) -> Result<Json<AppointmentEventResponse>, ApiError> {
    let id = AppointmentId::parse(&id)?;
    let event = state
        .dispatcher
        .dispatch(PayAppointmentCommand::new(id, req.payment_method_id))
        .await?;
    let appointment = event.appointment.clone();
    Ok(AppointmentEventResponse::of(&event, appointment))
}
