use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use orgsvc_auth::{AuthError, LoginTokens};
use orgsvc_models::AdminLoginRequest;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

/// Authenticate an organization admin
/// POST /admin/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<Json<LoginTokens>, (StatusCode, Json<ErrorResponse>)> {
    match state.auth_service.login(&request.email, &request.password).await {
        Ok(tokens) => Ok(Json(tokens)),
        Err(AuthError::InvalidCredentials) => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("unauthorized", "Invalid email or password")),
        )),
        Err(e) => {
            tracing::error!("Login error: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("internal_error", "Login failed")),
            ))
        }
    }
}
