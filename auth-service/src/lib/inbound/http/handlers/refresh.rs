use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Exchange a still-valid token for a fresh one. Expired tokens are refused.
pub async fn refresh(
    State(state): State<AppState>,
    body: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let Json(body) = body?;

    if body.token.is_empty() {
        return Err(ApiError::BadRequest("token is required".to_string()));
    }

    state
        .auth_service
        .refresh(&body.token)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, RefreshResponseData { token }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
}
