use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::identity::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Account of the caller the token was issued to.
pub async fn me(
    State(state): State<AppState>,
    current: AuthenticatedUser,
) -> Result<ApiSuccess<UserData>, ApiError> {
    // Tokens signed with our secret but naming no local account
    let user_id = UserId::from_string(current.identity.as_str())
        .map_err(|_| ApiError::NotFound("user not found".to_string()))?;

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
