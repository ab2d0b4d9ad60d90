//! Beacon web application server.
//!
//! Builds the application with the factory and serves it over TCP.

use beacon_web::{AppConfig, create_app_with_config, init_logging};
use clap::Parser;
use tracing::info;

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %listener.local_addr()?, "Server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Resolves when Ctrl-C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        testing = config.testing,
        "Starting Beacon"
    );

    let app = create_app_with_config(config.clone());
    let router = app.router()?;
    serve(router, &config).await
}
