use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::shared::api_error::ApiError;
use crate::shared::state::AppState;

/// Токен из заголовка `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Middleware that requires valid JWT authentication.
///
/// Если пароль не настроен, запросы пропускаются без проверки.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.auth.requires_auth() {
        return Ok(next.run(req).await);
    }

    let token = bearer_token(req.headers()).ok_or(ApiError::Unauthorized)?;
    let claims = state.auth.validate(token).map_err(|e| {
        tracing::debug!("Rejected token: {:#}", e);
        ApiError::Unauthorized
    })?;

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
