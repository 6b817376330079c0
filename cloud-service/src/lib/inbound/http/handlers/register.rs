use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::UserView;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<UserView>, ApiError> {
    state
        .auth_service
        .register(body.into())
        .await
        .map_err(ApiError::from)
        .map(|user| ApiSuccess::new(StatusCode::CREATED, user))
}

/// HTTP request body for registration (raw JSON).
///
/// Missing fields deserialize as empty strings so the service reports them
/// as validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl From<RegisterRequestBody> for RegisterCommand {
    fn from(body: RegisterRequestBody) -> Self {
        RegisterCommand {
            email: body.email,
            password: body.password,
            name: body.name,
            last_name: body.last_name,
        }
    }
}
