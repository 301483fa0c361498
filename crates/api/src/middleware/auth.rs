use crate::handlers::admin::ErrorResponse;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use orgsvc_auth::AuthError;
use std::sync::Arc;

/// Extract and validate the bearer token from the Authorization header
pub fn extract_bearer_token(
    headers: &HeaderMap,
) -> Result<String, (StatusCode, Json<ErrorResponse>)> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new(
                    "missing_auth_header",
                    "Authorization header is required",
                )),
            )
        })?
        .to_str()
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new(
                    "invalid_auth_header",
                    "Invalid Authorization header format",
                )),
            )
        })?;

    if !auth_header.starts_with("Bearer ") {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(
                "invalid_auth_scheme",
                "Authorization header must use Bearer scheme",
            )),
        ));
    }

    Ok(auth_header[7..].to_string())
}

/// Middleware to require a valid session claim. The verified claim is
/// stashed in request extensions; whether it still matches a live
/// organization is decided by the lifecycle layer.
pub async fn require_auth(
    State(state): State<Arc<crate::AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let token = extract_bearer_token(&headers)?;

    let claim = state.auth_service.jwt.verify(&token).map_err(|e| {
        tracing::warn!("Token validation failed: {}", e);
        let code = match e {
            AuthError::TokenExpired => "token_expired",
            _ => "invalid_token",
        };
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(code, &e.to_string())),
        )
    })?;

    request.extensions_mut().insert(claim);

    Ok(next.run(request).await)
}
