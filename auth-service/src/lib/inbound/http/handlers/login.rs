use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::authentication::models::LoginCommand;
use crate::authentication::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = body?;

    let email = EmailAddress::new(body.email).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let password =
        Password::candidate(body.password).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let session = state
        .auth_service
        .login(LoginCommand::new(email, password))
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthResponseData {
            user: (&session.user).into(),
            token: session.token,
        },
    ))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
