// Organization registry API server
// Main entry point for the multi-tenant organization REST API

mod config;
mod handlers;
mod middleware;
mod routes;

use config::Config;
use dotenvy::dotenv;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub struct AppState {
    pub lifecycle: orgsvc_tenant::TenantLifecycle,
    pub auth_service: orgsvc_auth::AuthService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,orgsvc_api=debug,tower_http=debug".to_string()),
        )
        .init();

    tracing::info!("Starting organization registry API");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env();
    tracing::info!("Server: {}:{}", config.server_host, config.server_port);

    // Initialize database
    let database = orgsvc_database::Database::new(config.database.clone()).await?;
    database.ping().await?;
    orgsvc_database::ensure_schema(database.pool()).await?;
    tracing::info!("Database connected");

    // Initialize JWT service (static signing secret, held for process lifetime)
    let jwt_service = orgsvc_auth::JwtService::from_env();
    tracing::info!("JWT service initialized");

    // Create auth service
    let directory = orgsvc_database::OrganizationRepository::new(database.pool().clone());
    let auth_service = orgsvc_auth::AuthService::new(directory, jwt_service);
    tracing::info!("Auth service initialized");

    // Create lifecycle orchestrator
    let lifecycle = orgsvc_tenant::TenantLifecycle::new(&database);
    tracing::info!("Tenant lifecycle initialized");

    // Create app state
    let state = Arc::new(AppState {
        lifecycle,
        auth_service,
    });

    // Create router
    let app = routes::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    tracing::info!("Routes configured:");
    tracing::info!("   GET    /health");
    tracing::info!("   POST   /org/create");
    tracing::info!("   GET    /org/get");
    tracing::info!("   PUT    /org/update");
    tracing::info!("   DELETE /org/delete");
    tracing::info!("   POST   /admin/login");

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server ready at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
