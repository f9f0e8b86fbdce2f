//! # HTTP Routes
//!
//! One route group per entity plus the admin endpoints.
//!
//! ## Route Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Group       Path                        Verbs                          │
//! │  ─────────   ─────────────────────────   ─────────────────────────────  │
//! │  branches    /api/branches               GET (list), POST (create)      │
//! │              /api/branches/{id}          GET, PUT, DELETE               │
//! │  cars        /api/cars[/{id}]            same five operations           │
//! │  customers   /api/customers[/{id}]       same five operations           │
//! │  rentals     /api/rentals[/{id}]         same five operations           │
//! │  admin       /api/reset-db               GET (when enabled)             │
//! │              /health                     GET                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod branches;
pub mod cars;
pub mod customers;
pub mod rentals;

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::routing::get;
use axum::{Json, Router};
use rental_core::EntityId;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::state::AppState;

/// Every `/api` route. The reset endpoint is only mounted when allowed.
pub fn api_routes(allow_reset: bool) -> Router<AppState> {
    let router = Router::new()
        .merge(branches::routes())
        .merge(cars::routes())
        .merge(customers::routes())
        .merge(rentals::routes());

    if allow_reset {
        router.route("/reset-db", get(admin::reset_db))
    } else {
        router
    }
}

// =============================================================================
// Extractors
// =============================================================================

/// Integer `{id}` path segment.
///
/// A segment that is not an integer matches no entity, so it is reported as
/// 404 rather than a 400 parse error.
#[derive(Debug, Clone, Copy)]
pub struct Id(pub EntityId);

impl<S> FromRequestParts<S> for Id
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<EntityId>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::not_found(format!("not found: {}", parts.uri.path())))?;
        Ok(Id(id))
    }
}

/// JSON request body whose rejections render as [`ApiError`].
///
/// Update handlers take `Result<Payload<T>, ApiError>` so a missing row is
/// reported as 404 before the body is looked at.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Payload(value))
    }
}
