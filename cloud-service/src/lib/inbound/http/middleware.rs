use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Middleware that authorizes the bearer token and stores the resulting
/// `SessionContext` in the request extensions.
///
/// A missing header, a malformed header and a rejected token all produce the
/// same 401 response.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req).ok_or_else(|| {
        tracing::debug!(uri = %req.uri(), "Request without bearer token");
        ApiError::unauthorized().into_response()
    })?;

    let session = state
        .auth_service
        .authorize(token)
        .map_err(|_| ApiError::unauthorized().into_response())?;

    tracing::debug!(user_id = %session.user_id, "Request authorized");
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
}
