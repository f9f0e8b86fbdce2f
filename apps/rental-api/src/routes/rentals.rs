//! # Rental Routes
//!
//! Rentals are leaves: they serialize flat and can always be deleted.
//! Updates touch the dates only.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rental_core::{Rental, RentalChanges, RentalDraft};
use tracing::info;

use super::{Id, Payload};
use crate::error::{integrity_as, ApiError, ApiResult};
use crate::state::AppState;

const RENTAL_CREATION_FAILED: &str =
    "Rental creation failed. Check if IDs for Car and Customer are valid.";

/// Rental route group.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rentals", get(list_rentals).post(create_rental))
        .route(
            "/rentals/{id}",
            get(get_rental).put(update_rental).delete(delete_rental),
        )
}

/// `GET /api/rentals`
pub async fn list_rentals(State(state): State<AppState>) -> ApiResult<Json<Vec<Rental>>> {
    Ok(Json(state.db.rentals().list().await?))
}

/// `GET /api/rentals/{id}`
pub async fn get_rental(State(state): State<AppState>, Id(id): Id) -> ApiResult<Json<Rental>> {
    state
        .db
        .rentals()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Rental not found: {}", id)))
}

/// `POST /api/rentals`
pub async fn create_rental(
    State(state): State<AppState>,
    Payload(draft): Payload<RentalDraft>,
) -> ApiResult<(StatusCode, Json<Rental>)> {
    let new_rental = draft.validate()?;
    let rental = state
        .db
        .rentals()
        .insert(&new_rental)
        .await
        .map_err(integrity_as(RENTAL_CREATION_FAILED))?;

    info!(
        id = rental.id,
        car_id = rental.car_id,
        customer_id = rental.customer_id,
        "Rental created"
    );

    Ok((StatusCode::CREATED, Json(rental)))
}

/// `PUT /api/rentals/{id}`
pub async fn update_rental(
    State(state): State<AppState>,
    Id(id): Id,
    payload: Result<Payload<RentalChanges>, ApiError>,
) -> ApiResult<Json<Rental>> {
    let repo = state.db.rentals();
    let mut rental = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Rental not found: {}", id)))?;
    let Payload(changes) = payload?;

    changes.apply(&mut rental)?;
    repo.update_dates(&rental).await?;

    info!(id, "Rental updated");
    Ok(Json(rental))
}

/// `DELETE /api/rentals/{id}`
pub async fn delete_rental(State(state): State<AppState>, Id(id): Id) -> ApiResult<StatusCode> {
    state.db.rentals().delete(id).await?;

    info!(id, "Rental deleted");
    Ok(StatusCode::NO_CONTENT)
}
