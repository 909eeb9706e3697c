// Main entry point for the role claims server

use anyhow::{Context, Result};
use identity_toolkit::{IdentityToolkitOptions, IdentityToolkitService};
use role_claims_core::{
    kernel::{IdentityToolkitAdapter, ServerDeps},
    server::{build_app, TokenVerifiers},
    Config,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,role_claims_core=debug,identity_toolkit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Role Claims API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(project = %config.identity_project_id, "Configuration loaded");

    let identity = Arc::new(IdentityToolkitService::new(IdentityToolkitOptions {
        project_id: config.identity_project_id.clone(),
        access_token: config.identity_access_token.clone(),
        base_url: config.identity_api_base_url.clone(),
    }));
    let server_deps = ServerDeps::new(
        Arc::new(IdentityToolkitAdapter::new(identity)),
        config.list_users_page_size,
    );

    let verifiers = TokenVerifiers {
        id_token: Arc::new(
            config
                .id_token
                .verifier()
                .context("Failed to build ID token verifier")?,
        ),
        app_check: Arc::new(
            config
                .app_check
                .verifier()
                .context("Failed to build App Check verifier")?,
        ),
    };

    // Build application
    let app = build_app(server_deps, verifiers, config.allowed_origins.clone());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
