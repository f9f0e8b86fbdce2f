//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Rental API                         │
//! │                                                                         │
//! │  Handler  ─►  ApiResult<T>                                              │
//! │                  │                                                      │
//! │                  ├─ JsonRejection ────────────► 400 VALIDATION_ERROR    │
//! │                  ├─ ValidationError ──────────► 400 VALIDATION_ERROR    │
//! │                  ├─ DbError::NotFound ────────► 404 NOT_FOUND           │
//! │                  ├─ DbError (FK / UNIQUE) ────► 400 INTEGRITY_ERROR     │
//! │                  │    (handler supplies the message via integrity_as)   │
//! │                  └─ anything else ────────────► 500, details logged     │
//! │                                                                         │
//! │  Response body: {"error": "<message>", "code": "<CODE>"}                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rental_core::ValidationError;
use rental_db::DbError;
use serde::Serialize;

/// API error returned from HTTP handlers.
///
/// ## Serialization
/// ```json
/// {
///   "error": "Car not found: 7",
///   "code": "NOT_FOUND"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    #[serde(rename = "error")]
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Path exists but not for this verb (405)
    MethodNotAllowed,

    /// Malformed body or missing required key (400)
    ValidationError,

    /// Foreign key or unique constraint rejected the write (400)
    IntegrityError,

    /// Database operation failed (500)
    DatabaseError,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::ValidationError | ErrorCode::IntegrityError => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an integrity error.
    pub fn integrity(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::IntegrityError, message)
    }
}

/// Maps constraint failures to a fixed client-facing message; every other
/// database error goes through the regular conversion.
///
/// ```rust,ignore
/// state.db.cars().insert(&car).await.map_err(integrity_as(UNKNOWN_BRANCH))?;
/// ```
pub fn integrity_as(message: &'static str) -> impl FnOnce(DbError) -> ApiError {
    move |err| {
        if err.is_integrity_violation() {
            tracing::debug!(error = %err, "Write rejected by constraint");
            ApiError::integrity(message)
        } else {
            ApiError::from(err)
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                ApiError::not_found(format!("{} not found: {}", entity, id))
            }
            DbError::UniqueViolation { field } => {
                ApiError::integrity(format!("Duplicate value for {}", field))
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::integrity("Invalid reference")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                tracing::error!("Database pool exhausted");
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts payload validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Malformed JSON, wrong value types and a missing content type all land here.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================
