use crate::handlers::admin::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    Json,
};
use orgsvc_auth::SessionClaim;
use orgsvc_models::{
    CreateOrganizationRequest, DeleteOrganizationRequest, OrganizationResponse,
    UpdateOrganizationRequest,
};
use orgsvc_tenant::TenantError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct GetOrgQuery {
    pub organization_name: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn error_response(err: TenantError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        TenantError::DuplicateOrgName(_) => (StatusCode::BAD_REQUEST, "organization_exists"),
        TenantError::DuplicateAdminEmail(_) => (StatusCode::BAD_REQUEST, "email_registered"),
        TenantError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        TenantError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
        TenantError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
        TenantError::PasswordHash(_) | TenantError::Storage(_) => {
            tracing::error!("Organization operation failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    };

    (status, Json(ErrorResponse::new(code, &err.to_string())))
}

fn validation_error(err: validator::ValidationErrors) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("invalid_request", &err.to_string())),
    )
}

/// Create an organization with its admin credential and namespace
/// POST /org/create
pub async fn create_org(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateOrganizationRequest>,
) -> Result<Json<OrganizationResponse>, (StatusCode, Json<ErrorResponse>)> {
    request.validate().map_err(validation_error)?;

    let org = state.lifecycle.create(&request).await.map_err(error_response)?;
    Ok(Json(org))
}

/// Fetch the public projection of an organization
/// GET /org/get?organization_name=...
pub async fn get_org(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetOrgQuery>,
) -> Result<Json<OrganizationResponse>, (StatusCode, Json<ErrorResponse>)> {
    let org = state
        .lifecycle
        .read(&query.organization_name)
        .await
        .map_err(error_response)?;
    Ok(Json(org))
}

/// Rename the caller's organization and rotate its admin credential
/// PUT /org/update
pub async fn update_org(
    State(state): State<Arc<AppState>>,
    Extension(claim): Extension<SessionClaim>,
    Json(request): Json<UpdateOrganizationRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    request.validate().map_err(validation_error)?;

    state
        .lifecycle
        .rename(&claim, &request)
        .await
        .map_err(error_response)?;

    Ok(Json(MessageResponse {
        message: "Organization updated successfully".to_string(),
    }))
}

/// Delete the caller's organization
/// DELETE /org/delete
pub async fn delete_org(
    State(state): State<Arc<AppState>>,
    Extension(claim): Extension<SessionClaim>,
    Json(request): Json<DeleteOrganizationRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .lifecycle
        .delete(&claim, &request.organization_name)
        .await
        .map_err(error_response)?;

    Ok(Json(MessageResponse {
        message: "Organization deleted successfully".to_string(),
    }))
}
