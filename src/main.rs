use anyhow::Result;
use std::future::IntoFuture;
use tracing::info;

use tern::config::Config;
use tern::{api, redirect, storage, UrlService};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping servers");
}

#[tokio::main]
async fn main() -> Result<()> {
    tern::init_tracing();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");

    // Initialize storage
    info!(
        "Using {:?} storage: {}",
        config.database.backend, config.database.url
    );
    let storage = storage::connect(&config.database).await?;
    info!("Database initialized successfully");

    let service = UrlService::new(storage);

    // Create routers
    let api_router = api::create_api_router(service.clone());
    let redirect_router = redirect::create_redirect_router(service, config.redirect_status);

    // Start API server
    let api_addr = format!("{}:{}", config.api_server.host, config.api_server.port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("🚀 API server listening on http://{}", api_addr);
    info!("   - Endpoints available at http://{}/shorten", api_addr);

    // Start redirect server
    let redirect_addr = format!(
        "{}:{}",
        config.redirect_server.host, config.redirect_server.port
    );
    let redirect_listener = tokio::net::TcpListener::bind(&redirect_addr).await?;
    info!(
        "🚀 Redirect server listening on http://{} ({:?} redirects)",
        redirect_addr, config.redirect_status
    );

    // Run both servers concurrently
    tokio::try_join!(
        axum::serve(api_listener, api_router)
            .with_graceful_shutdown(shutdown_signal())
            .into_future(),
        axum::serve(redirect_listener, redirect_router)
            .with_graceful_shutdown(shutdown_signal())
            .into_future(),
    )?;

    Ok(())
}
