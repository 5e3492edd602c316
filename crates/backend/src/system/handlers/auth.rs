use axum::extract::{Json, State};
use chrono::Utc;
use contracts::system::auth::{AuthStatus, LoginRequest, LoginResponse};

use crate::shared::api_error::ApiError;
use crate::shared::state::AppState;

/// GET /api/system/auth/status
pub async fn status(State(state): State<AppState>) -> Json<AuthStatus> {
    Json(AuthStatus {
        requires_auth: state.auth.requires_auth(),
    })
}

/// POST /api/system/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if !state.auth.requires_auth() {
        return Err(ApiError::AuthNotConfigured);
    }
    if !state.auth.verify_password(&request.password) {
        tracing::warn!("Login attempt with wrong password");
        return Err(ApiError::Unauthorized);
    }

    let response = state.auth.issue(Utc::now())?;
    tracing::info!("Issued access token, expires at {}", response.expires_at);
    Ok(Json(response))
}
