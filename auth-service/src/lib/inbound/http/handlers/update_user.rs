use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::identity::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::policy;
use crate::user::ports::UserServicePort;

/// HTTP request body for updating a user (raw JSON)
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        // Validation happens here - errors are automatically converted via #[from]
        let email = self.email.map(EmailAddress::new).transpose()?;
        let password = self.password.map(Password::new).transpose()?;
        let firstname = self.firstname.map(PersonName::new).transpose()?;
        let lastname = self.lastname.map(PersonName::new).transpose()?;

        Ok(UpdateUserCommand {
            email,
            password,
            firstname,
            lastname,
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    current: Option<AuthenticatedUser>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    policy::authorize(current.as_ref().map(|user| &user.identity), &id)?;

    let Json(req) = body?;
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
