//! Agency Back Office - API Server Binary
//!
//! This binary starts the HTTP server for the marketing site content
//! API and the admin back office.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin backoffice-api
//!
//! # Run with environment variables
//! BACKOFFICE_HOST=0.0.0.0 BACKOFFICE_PORT=8080 cargo run --bin backoffice-api
//! ```
//!
//! # Environment Variables
//!
//! * `BACKOFFICE_HOST` - Server host (default: 0.0.0.0)
//! * `BACKOFFICE_PORT` - Server port (default: 8080)
//! * `BACKOFFICE_SESSION_SECRET` - Session signing secret (required in production)
//! * `BACKOFFICE_SESSION_TTL_SECS` - Session lifetime in seconds (default: 86400)
//! * `BACKOFFICE_ADMIN_EMAILS` - Comma-separated admin allow-list (default: empty, nobody)
//! * `BACKOFFICE_RATE_LIMIT_WINDOW_SECS` - Rate-limit window length (default: 60)
//! * `BACKOFFICE_RATE_LIMIT_MAX_REQUESTS` - Requests per identity per window (default: 120)
//! * `BACKOFFICE_NUMBERING` - Document numbering strategy: snapshot or reserved (default: snapshot)
//! * `BACKOFFICE_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use infra_store::MemoryStore;
use interface_api::{config::ApiConfig, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, builds the in-memory
/// store, and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = load_config();

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        admins = config.allowed_admins().len(),
        "Starting Agency Back Office API Server"
    );

    if config.allowed_admins().is_empty() {
        tracing::warn!("BACKOFFICE_ADMIN_EMAILS is empty; the admin surface will admit nobody");
    }

    // State lives in this process; a restart starts from the samples
    let store = Arc::new(MemoryStore::new());

    // Create the API router
    let app = create_router(store, config.clone());

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to default values if environment variables are not set.
fn load_config() -> ApiConfig {
    // Try to load from environment with BACKOFFICE_ prefix
    ApiConfig::from_env().unwrap_or_else(|_| {
        // Fall back to individual env vars or defaults
        let defaults = ApiConfig::default();
        ApiConfig {
            host: std::env::var("BACKOFFICE_HOST").unwrap_or(defaults.host),
            port: std::env::var("BACKOFFICE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            session_secret: std::env::var("BACKOFFICE_SESSION_SECRET")
                .unwrap_or(defaults.session_secret),
            session_ttl_secs: std::env::var("BACKOFFICE_SESSION_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.session_ttl_secs),
            admin_emails: std::env::var("BACKOFFICE_ADMIN_EMAILS")
                .unwrap_or(defaults.admin_emails),
            rate_limit_window_secs: std::env::var("BACKOFFICE_RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rate_limit_window_secs),
            rate_limit_max_requests: std::env::var("BACKOFFICE_RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rate_limit_max_requests),
            numbering: std::env::var("BACKOFFICE_NUMBERING").unwrap_or(defaults.numbering),
            log_level: std::env::var("BACKOFFICE_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
        }
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
