//! # Car Rental API
//!
//! REST server for branches, cars, customers and rentals.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rental API Server                                │
//! │                                                                         │
//! │  Client ───► HTTP (5000) ───► Route groups ───► SQLite (rental.db)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;
use tracing::info;

use rental_api::{app, init_tracing, ApiConfig, AppState};
use rental_db::Database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Car Rental API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        addr = %config.socket_addr(),
        db_path = %config.database_path.display(),
        allow_reset = config.allow_reset,
        "Configuration loaded"
    );

    // Open database (applies migrations)
    let db = Database::new(config.db_config()).await?;
    info!("Database ready");

    let router = app(AppState::new(db.clone()), config.allow_reset);

    let listener = TcpListener::bind(config.socket_addr()).await?;
    info!(addr = %config.socket_addr(), "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
