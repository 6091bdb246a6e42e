use axum::{extract::State, http::StatusCode};

use crate::common::AppState;
use crate::db::SessionError;
use crate::error::AppResult;

/// Health check endpoint
///
/// Returns 200 OK when the service is up and the database answers a ping.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 500, description = "Database unreachable"),
    ),
    security(("api_key" = [])),
    tag = "health"
)]
pub async fn healthz(State(state): State<AppState>) -> AppResult<StatusCode> {
    state
        .repo
        .session()
        .connection()
        .ping()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Database ping failed");
            SessionError
        })?;
    Ok(StatusCode::OK)
}
