//! Gitea webhook receiver.
//!
//! This binary provides a small web server that:
//! - Receives webhook deliveries from Gitea
//! - Verifies the event type and HMAC signature
//! - Decodes and logs the payload
//!
//! Configuration comes from the environment (see [`Config`]).

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    routing::{any, get},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gitea_webhook::web::{gitea_webhook, health, AppState};
use gitea_webhook::{Config, Webhook};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        secret_configured = config.webhook_secret.is_some(),
        secret_file = ?config.webhook_secret_file,
        events = ?config.events,
        "config_loaded"
    );

    let webhook = Webhook::new(config.webhook_options())
        .context("Failed to configure webhook verifier")?;
    if !webhook.has_secret() {
        warn!("gitea_signature_verification_disabled");
    }
    if config.events.is_empty() {
        warn!("gitea_no_events_accepted");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(config, webhook);

    // Build the router
    let app = Router::new()
        .route("/health", get(health))
        .route("/webhooks/gitea", any(gitea_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
