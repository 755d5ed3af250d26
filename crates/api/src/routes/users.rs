//! User endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{Msisdn, SimpleType};
use serde::Deserialize;
use user::{FindUserByMsisdnQuery, RegisterUserCommand, UserDto};

use super::AppState;
use crate::error::ApiError;

fn default_role() -> String {
    "USER".to_string()
}

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub msisdn: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
}

/// POST /users: register a new user.
#[tracing::instrument(skip(state, req))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let command = RegisterUserCommand::new(req.msisdn, req.email, req.password, req.role);
    let event = state.dispatcher.dispatch(command).await?;
    Ok((StatusCode::CREATED, Json(event.user)))
}

/// GET /users/msisdn/{msisdn}: look a user up by phone number in any
/// accepted format.
#[tracing::instrument(skip(state))]
pub async fn find_by_msisdn(
    State(state): State<Arc<AppState>>,
    Path(msisdn): Path<String>,
) -> Result<Json<UserDto>, ApiError> {
    let msisdn = Msisdn::of(msisdn)?;
    let found = state
        .dispatcher
        .dispatch(FindUserByMsisdnQuery::new(msisdn))
        .await?;
    Ok(Json(found.user))
}
