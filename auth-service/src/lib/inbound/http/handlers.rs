use auth::PasswordError;
use auth::TokenError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::policy::PolicyError;

pub mod delete_user;
pub mod get_user;
pub mod login;
pub mod me;
pub mod refresh;
pub mod register;
pub mod update_user;

const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
}

impl ApiError {
    /// Log `cause` and hide it behind a fixed message.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "Request failed with internal error");
        Self::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
    }

    pub fn invalid_token() -> Self {
        Self::Unauthorized("invalid or expired token".to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUserId(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_)
            | UserError::InvalidName(_)
            | UserError::Password(PasswordError::InvalidInput) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::NotFound(_) => ApiError::NotFound("user not found".to_string()),
            UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict("user with this email already exists".to_string())
            }
            UserError::InvalidCredentials => {
                ApiError::Unauthorized("invalid email or password".to_string())
            }
            UserError::Token(TokenError::SigningFailed(_)) => ApiError::internal(err),
            UserError::Token(ref kind) => {
                tracing::warn!(error = %kind, "Token rejected");
                ApiError::invalid_token()
            }
            UserError::Password(_)
            | UserError::Identity(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::internal(err),
        }
    }
}

impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::Unauthenticated => ApiError::Unauthorized(err.to_string()),
            PolicyError::Forbidden => ApiError::Forbidden(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::BadRequest("invalid request body".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of a user. Never carries credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            firstname: user.firstname.as_ref().map(ToString::to_string),
            lastname: user.lastname.as_ref().map(ToString::to_string),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Token plus the user it was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub token: String,
    pub user: UserData,
}
