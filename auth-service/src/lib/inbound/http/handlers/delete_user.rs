use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::identity::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::policy;
use crate::user::ports::UserServicePort;

pub async fn delete_user(
    State(state): State<AppState>,
    current: Option<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    policy::authorize(current.as_ref().map(|user| &user.identity), &id)?;

    let user_id = UserId::from_string(&id).map_err(UserError::from)?;

    state
        .user_service
        .delete_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
