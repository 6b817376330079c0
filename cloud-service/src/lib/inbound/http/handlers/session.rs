use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use crate::domain::user::models::SessionContext;

pub async fn session(Extension(session): Extension<SessionContext>) -> ApiSuccess<SessionContext> {
    ApiSuccess::new(StatusCode::OK, session)
}
