//! # Customer Routes

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rental_core::{CustomerChanges, CustomerDraft, CustomerView};
use tracing::info;

use super::{Id, Payload};
use crate::error::{integrity_as, ApiError, ApiResult};
use crate::state::AppState;

const EMAIL_TAKEN: &str = "Email address is already registered to another customer.";
const CUSTOMER_HAS_RENTALS: &str =
    "Customer removal failed. Customer is still probably associated with a rental.";

/// Customer route group.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

/// `GET /api/customers`
pub async fn list_customers(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CustomerView>>> {
    Ok(Json(state.db.customers().list_views().await?))
}

/// `GET /api/customers/{id}`
pub async fn get_customer(
    State(state): State<AppState>,
    Id(id): Id,
) -> ApiResult<Json<CustomerView>> {
    Ok(Json(state.db.customers().get_view(id).await?))
}

/// `POST /api/customers`
pub async fn create_customer(
    State(state): State<AppState>,
    Payload(draft): Payload<CustomerDraft>,
) -> ApiResult<(StatusCode, Json<CustomerView>)> {
    let new_customer = draft.validate()?;
    let customer = state
        .db
        .customers()
        .insert(&new_customer)
        .await
        .map_err(integrity_as(EMAIL_TAKEN))?;

    info!(id = customer.id, "Customer created");

    Ok((
        StatusCode::CREATED,
        Json(CustomerView {
            customer,
            rentals: Vec::new(),
        }),
    ))
}

/// `PUT /api/customers/{id}`
pub async fn update_customer(
    State(state): State<AppState>,
    Id(id): Id,
    payload: Result<Payload<CustomerChanges>, ApiError>,
) -> ApiResult<Json<CustomerView>> {
    let repo = state.db.customers();
    let mut customer = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Customer not found: {}", id)))?;
    let Payload(changes) = payload?;

    changes.apply(&mut customer);
    repo.update(&customer).await.map_err(integrity_as(EMAIL_TAKEN))?;

    info!(id, "Customer updated");
    Ok(Json(repo.get_view(id).await?))
}

/// `DELETE /api/customers/{id}`
pub async fn delete_customer(State(state): State<AppState>, Id(id): Id) -> ApiResult<StatusCode> {
    state
        .db
        .customers()
        .delete(id)
        .await
        .map_err(integrity_as(CUSTOMER_HAS_RENTALS))?;

    info!(id, "Customer deleted");
    Ok(StatusCode::NO_CONTENT)
}
