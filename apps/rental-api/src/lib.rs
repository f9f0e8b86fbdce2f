//! # rental-api: REST Server for the Car Rental Service
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rental API Request Flow                          │
//! │                                                                         │
//! │  HTTP client                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TraceLayer (request span)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Router ─┬─ /api/branches ─┐                                            │
//! │          ├─ /api/cars ─────┤                                            │
//! │          ├─ /api/customers ┼──► Database (rental-db) ──► SQLite          │
//! │          ├─ /api/rentals ──┤                                            │
//! │          ├─ /api/reset-db ─┘                                            │
//! │          ├─ /health                                                     │
//! │          └─ fallback ──► 404 {"error", "code"}                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::http::Uri;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

/// Builds the application router.
pub fn app(state: AppState, allow_reset: bool) -> Router {
    Router::new()
        .nest("/api", routes::api_routes(allow_reset))
        .route("/health", get(routes::admin::health))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("not found: {}", uri.path()))
}

async fn method_not_allowed(uri: Uri) -> ApiError {
    ApiError::new(
        ErrorCode::MethodNotAllowed,
        format!("method not allowed: {}", uri.path()),
    )
}

/// Initializes the tracing subscriber.
///
/// Respects `RUST_LOG`; defaults to info with debug output from this
/// service's crates.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rental=debug,sqlx=warn,tower_http=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
