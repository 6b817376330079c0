use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::SessionContext;
use crate::domain::user::models::UserView;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Profile of the caller behind the bearer token.
pub async fn current_user(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<ApiSuccess<UserView>, ApiError> {
    state
        .auth_service
        .current_user(&session)
        .await
        .map_err(ApiError::from)
        .map(|user| ApiSuccess::new(StatusCode::OK, user))
}
