//! # Car Routes
//!
//! Every car belongs to a branch; a `branch_id` that points nowhere is
//! rejected by the foreign key and reported as a 400.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rental_core::{CarChanges, CarDraft, CarView};
use tracing::info;

use super::{Id, Payload};
use crate::error::{integrity_as, ApiError, ApiResult};
use crate::state::AppState;

const UNKNOWN_BRANCH: &str = "Invalid branch_id field, specified branch does not exist.";
const CAR_HAS_RENTALS: &str = "Car removal failed. Car is probably still associated with a rental.";

/// Car route group.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list_cars).post(create_car))
        .route("/cars/{id}", get(get_car).put(update_car).delete(delete_car))
}

/// `GET /api/cars`
pub async fn list_cars(State(state): State<AppState>) -> ApiResult<Json<Vec<CarView>>> {
    Ok(Json(state.db.cars().list_views().await?))
}

/// `GET /api/cars/{id}`
pub async fn get_car(State(state): State<AppState>, Id(id): Id) -> ApiResult<Json<CarView>> {
    Ok(Json(state.db.cars().get_view(id).await?))
}

/// `POST /api/cars`
///
/// New cars always start out available.
pub async fn create_car(
    State(state): State<AppState>,
    Payload(draft): Payload<CarDraft>,
) -> ApiResult<(StatusCode, Json<CarView>)> {
    let new_car = draft.validate()?;
    let car = state
        .db
        .cars()
        .insert(&new_car)
        .await
        .map_err(integrity_as(UNKNOWN_BRANCH))?;

    info!(id = car.id, branch_id = car.branch_id, "Car created");

    Ok((
        StatusCode::CREATED,
        Json(CarView {
            car,
            rentals: Vec::new(),
        }),
    ))
}

/// `PUT /api/cars/{id}`
pub async fn update_car(
    State(state): State<AppState>,
    Id(id): Id,
    payload: Result<Payload<CarChanges>, ApiError>,
) -> ApiResult<Json<CarView>> {
    let repo = state.db.cars();
    let mut car = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Car not found: {}", id)))?;
    let Payload(changes) = payload?;

    changes.apply(&mut car);
    repo.update(&car).await.map_err(integrity_as(UNKNOWN_BRANCH))?;

    info!(id, "Car updated");
    Ok(Json(repo.get_view(id).await?))
}

/// `DELETE /api/cars/{id}`
pub async fn delete_car(State(state): State<AppState>, Id(id): Id) -> ApiResult<StatusCode> {
    state
        .db
        .cars()
        .delete(id)
        .await
        .map_err(integrity_as(CAR_HAS_RENTALS))?;

    info!(id, "Car deleted");
    Ok(StatusCode::NO_CONTENT)
}
