use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::common::AppState;
use crate::error::{AppError, AppResult};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Reject any request whose `X-API-KEY` header does not match the configured
/// secret. Handlers never run for such requests.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    let authorized = match request.headers().get(API_KEY_HEADER) {
        Some(key) => key_matches(key.as_bytes(), state.api_key.as_bytes()),
        None => {
            tracing::warn!(path = %request.uri().path(), "Rejected request without API key");
            return Err(AppError::Unauthorized);
        }
    };

    if !authorized {
        tracing::warn!(path = %request.uri().path(), "Rejected request with invalid API key");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// Constant-time comparison of the provided key against the secret
fn key_matches(provided: &[u8], expected: &[u8]) -> bool {
    provided.ct_eq(expected).into()
}
