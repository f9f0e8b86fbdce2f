//! # Branch Routes
//!
//! Branches are the top of the entity graph; every view carries the
//! branch's cars, each with its rentals.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rental_core::{BranchChanges, BranchDraft, BranchView};
use tracing::info;

use super::{Id, Payload};
use crate::error::{integrity_as, ApiError, ApiResult};
use crate::state::AppState;

const BRANCH_HAS_CARS: &str = "Can not delete branch, associated cars still exist.";

/// Branch route group.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/branches", get(list_branches).post(create_branch))
        .route(
            "/branches/{id}",
            get(get_branch).put(update_branch).delete(delete_branch),
        )
}

/// `GET /api/branches`
pub async fn list_branches(State(state): State<AppState>) -> ApiResult<Json<Vec<BranchView>>> {
    Ok(Json(state.db.branches().list_views().await?))
}

/// `GET /api/branches/{id}`
pub async fn get_branch(
    State(state): State<AppState>,
    Id(id): Id,
) -> ApiResult<Json<BranchView>> {
    Ok(Json(state.db.branches().get_view(id).await?))
}

/// `POST /api/branches`
pub async fn create_branch(
    State(state): State<AppState>,
    Payload(draft): Payload<BranchDraft>,
) -> ApiResult<(StatusCode, Json<BranchView>)> {
    let new_branch = draft.validate()?;
    let branch = state.db.branches().insert(&new_branch).await?;

    info!(id = branch.id, name = %branch.name, "Branch created");

    Ok((
        StatusCode::CREATED,
        Json(BranchView {
            branch,
            cars: Vec::new(),
        }),
    ))
}

/// `PUT /api/branches/{id}`
pub async fn update_branch(
    State(state): State<AppState>,
    Id(id): Id,
    payload: Result<Payload<BranchChanges>, ApiError>,
) -> ApiResult<Json<BranchView>> {
    let repo = state.db.branches();
    let mut branch = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Branch not found: {}", id)))?;
    let Payload(changes) = payload?;

    changes.apply(&mut branch);
    repo.update(&branch).await?;

    info!(id, "Branch updated");
    Ok(Json(repo.get_view(id).await?))
}

/// `DELETE /api/branches/{id}`
pub async fn delete_branch(State(state): State<AppState>, Id(id): Id) -> ApiResult<StatusCode> {
    state
        .db
        .branches()
        .delete(id)
        .await
        .map_err(integrity_as(BRANCH_HAS_CARS))?;

    info!(id, "Branch deleted");
    Ok(StatusCode::NO_CONTENT)
}
