use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::authentication::models::RegisterCommand;
use crate::authentication::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::PersonName;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordPolicyError;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|session| {
            ApiSuccess::new(
                StatusCode::CREATED,
                AuthResponseData {
                    user: (&session.user).into(),
                    token: session.token,
                },
            )
        })
}

/// HTTP request body for registration (raw JSON)
#[derive(Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
    #[serde(default)]
    firstname: Option<String>,
    #[serde(default)]
    lastname: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Invalid name: {0}")]
    Name(#[from] NameError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let firstname = PersonName::optional(self.firstname)?;
        let lastname = PersonName::optional(self.lastname)?;
        Ok(RegisterCommand::new(email, password, firstname, lastname))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
