use crate::handlers;
use crate::middleware;
use crate::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Organization lifecycle
        .route("/org/create", post(handlers::org::create_org))
        .route("/org/get", get(handlers::org::get_org))
        .route(
            "/org/update",
            put(handlers::org::update_org)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        .route(
            "/org/delete",
            delete(handlers::org::delete_org)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        // Authentication
        .route("/admin/login", post(handlers::admin::login))
        .with_state(state)
}
