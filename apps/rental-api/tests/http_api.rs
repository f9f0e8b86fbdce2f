//! Integration tests driving the full router against an in-memory database.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use rental_api::{app, AppState};
use rental_db::{Database, DbConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_router(allow_reset: bool) -> Result<Router, String> {
    let db = Database::new(DbConfig::in_memory())
        .await
        .map_err(|err| format!("open database: {err}"))?;
    Ok(app(AppState::new(db), allow_reset))
}

async fn send(router: &Router, req: Request<Body>) -> Result<(StatusCode, Value), String> {
    let response = router
        .clone()
        .oneshot(req)
        .await
        .map_err(|err| format!("route request: {err}"))?;
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .map_err(|err| format!("read response body: {err}"))?;

    let parsed = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|err| format!("parse response body: {err}"))?
    };
    Ok((status, parsed))
}

async fn api_request(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value), String> {
    let builder = Request::builder().method(method).uri(uri);

    let req = if let Some(payload) = body {
        let bytes =
            serde_json::to_vec(&payload).map_err(|err| format!("serialize request body: {err}"))?;
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .map_err(|err| format!("build request: {err}"))?
    } else {
        builder
            .body(Body::empty())
            .map_err(|err| format!("build request: {err}"))?
    };

    send(router, req).await
}

/// Creates a branch, a car in it, a customer and one rental linking them.
/// Returns `(branch_id, car_id, customer_id, rental_id)`.
async fn seed_graph(router: &Router) -> Result<(i64, i64, i64, i64), String> {
    let (_, branch) = api_request(
        router,
        Method::POST,
        "/api/branches",
        Some(json!({"name": "Downtown", "location": "12 Market Street"})),
    )
    .await?;
    let branch_id = branch["id"].as_i64().ok_or("branch id")?;

    let (_, car) = api_request(
        router,
        Method::POST,
        "/api/cars",
        Some(json!({
            "make": "Honda",
            "model": "Civic",
            "year": 2020,
            "rental_rate": 39.99,
            "branch_id": branch_id
        })),
    )
    .await?;
    let car_id = car["id"].as_i64().ok_or("car id")?;

    let (_, customer) = api_request(
        router,
        Method::POST,
        "/api/customers",
        Some(json!({"name": "Ada", "email": "ada@example.com", "phone": "555-0100"})),
    )
    .await?;
    let customer_id = customer["id"].as_i64().ok_or("customer id")?;

    let (status, rental) = api_request(
        router,
        Method::POST,
        "/api/rentals",
        Some(json!({
            "car_id": car_id,
            "customer_id": customer_id,
            "start_date": "2024-06-01",
            "end_date": "2024-06-04"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let rental_id = rental["id"].as_i64().ok_or("rental id")?;

    Ok((branch_id, car_id, customer_id, rental_id))
}

#[tokio::test]
async fn branch_lifecycle() -> Result<(), String> {
    let router = test_router(true).await?;

    let (status, created) = api_request(
        &router,
        Method::POST,
        "/api/branches",
        Some(json!({"name": "Airport", "location": "Terminal 2"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Airport");
    assert_eq!(created["cars"], json!([]));
    let id = created["id"].as_i64().ok_or("missing id")?;

    let (status, listed) = api_request(&router, Method::GET, "/api/branches", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let (status, updated) = api_request(
        &router,
        Method::PUT,
        &format!("/api/branches/{id}"),
        Some(json!({"location": "Terminal 3"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Airport");
    assert_eq!(updated["location"], "Terminal 3");

    let (status, body) =
        api_request(&router, Method::DELETE, &format!("/api/branches/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) =
        api_request(&router, Method::GET, &format!("/api/branches/{id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn missing_required_field_is_rejected() -> Result<(), String> {
    let router = test_router(true).await?;

    let (status, body) = api_request(
        &router,
        Method::POST,
        "/api/branches",
        Some(json!({"name": "No location"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: location.");
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = api_request(
        &router,
        Method::POST,
        "/api/customers",
        Some(json!({"name": "Ada", "email": null, "phone": "1"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: email.");
    Ok(())
}

#[tokio::test]
async fn nested_views_carry_dependents() -> Result<(), String> {
    let router = test_router(true).await?;
    let (branch_id, car_id, customer_id, rental_id) = seed_graph(&router).await?;

    let (status, branch) =
        api_request(&router, Method::GET, &format!("/api/branches/{branch_id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let car = &branch["cars"][0];
    assert_eq!(car["id"], car_id);
    assert_eq!(car["availability"], true);
    assert_eq!(car["rentals"][0]["id"], rental_id);
    assert_eq!(car["rentals"][0]["start_date"], "2024-06-01");

    let (_, customer) = api_request(
        &router,
        Method::GET,
        &format!("/api/customers/{customer_id}"),
        None,
    )
    .await?;
    assert_eq!(customer["email"], "ada@example.com");
    assert_eq!(customer["rentals"][0]["car_id"], car_id);

    let (_, cars) = api_request(&router, Method::GET, "/api/cars", None).await?;
    assert_eq!(cars[0]["rentals"][0]["end_date"], "2024-06-04");

    let (_, rental) =
        api_request(&router, Method::GET, &format!("/api/rentals/{rental_id}"), None).await?;
    assert_eq!(rental["customer_id"], customer_id);
    assert!(rental.get("rentals").is_none());
    Ok(())
}

#[tokio::test]
async fn car_with_unknown_branch_is_rejected() -> Result<(), String> {
    let router = test_router(true).await?;
    let (_, car_id, _, _) = seed_graph(&router).await?;

    let (status, body) = api_request(
        &router,
        Method::POST,
        "/api/cars",
        Some(json!({
            "make": "Ford",
            "model": "Focus",
            "year": 2019,
            "rental_rate": 35.0,
            "branch_id": 999
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid branch_id field, specified branch does not exist."
    );

    let (status, body) = api_request(
        &router,
        Method::PUT,
        &format!("/api/cars/{car_id}"),
        Some(json!({"branch_id": 999, "model": "Accord"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INTEGRITY_ERROR");

    // Nothing was written
    let (_, car) = api_request(&router, Method::GET, &format!("/api/cars/{car_id}"), None).await?;
    assert_eq!(car["model"], "Civic");
    Ok(())
}

#[tokio::test]
async fn car_update_is_partial() -> Result<(), String> {
    let router = test_router(true).await?;
    let (branch_id, car_id, _, _) = seed_graph(&router).await?;

    let (status, car) = api_request(
        &router,
        Method::PUT,
        &format!("/api/cars/{car_id}"),
        Some(json!({"availability": false, "rental_rate": 45.5})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(car["availability"], false);
    assert_eq!(car["rental_rate"], 45.5);
    assert_eq!(car["make"], "Honda");
    assert_eq!(car["branch_id"], branch_id);
    assert_eq!(car["rentals"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn dependents_block_deletes() -> Result<(), String> {
    let router = test_router(true).await?;
    let (branch_id, car_id, customer_id, rental_id) = seed_graph(&router).await?;

    let (status, body) =
        api_request(&router, Method::DELETE, &format!("/api/branches/{branch_id}"), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Can not delete branch, associated cars still exist.");

    let (status, body) =
        api_request(&router, Method::DELETE, &format!("/api/cars/{car_id}"), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Car removal failed. Car is probably still associated with a rental."
    );

    let (status, body) = api_request(
        &router,
        Method::DELETE,
        &format!("/api/customers/{customer_id}"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Customer removal failed. Customer is still probably associated with a rental."
    );

    // Bottom-up removal works
    for uri in [
        format!("/api/rentals/{rental_id}"),
        format!("/api/cars/{car_id}"),
        format!("/api/customers/{customer_id}"),
        format!("/api/branches/{branch_id}"),
    ] {
        let (status, _) = api_request(&router, Method::DELETE, &uri, None).await?;
        assert_eq!(status, StatusCode::NO_CONTENT, "DELETE {uri}");
    }
    Ok(())
}

#[tokio::test]
async fn rental_creation_checks_references_and_dates() -> Result<(), String> {
    let router = test_router(true).await?;
    let (_, car_id, _, _) = seed_graph(&router).await?;

    let (status, body) = api_request(
        &router,
        Method::POST,
        "/api/rentals",
        Some(json!({
            "car_id": car_id,
            "customer_id": 4242,
            "start_date": "2024-07-01",
            "end_date": "2024-07-02"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Rental creation failed. Check if IDs for Car and Customer are valid."
    );

    let (status, body) = api_request(
        &router,
        Method::POST,
        "/api/rentals",
        Some(json!({
            "car_id": car_id,
            "customer_id": 1,
            "start_date": "01/07/2024",
            "end_date": "2024-07-02"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, rentals) = api_request(&router, Method::GET, "/api/rentals", None).await?;
    assert_eq!(rentals.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn rental_update_changes_dates_only() -> Result<(), String> {
    let router = test_router(true).await?;
    let (_, car_id, _, rental_id) = seed_graph(&router).await?;

    let (status, rental) = api_request(
        &router,
        Method::PUT,
        &format!("/api/rentals/{rental_id}"),
        Some(json!({"end_date": "2024-06-10", "car_id": 999})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rental["start_date"], "2024-06-01");
    assert_eq!(rental["end_date"], "2024-06-10");
    assert_eq!(rental["car_id"], car_id);

    let (status, _) = api_request(
        &router,
        Method::PUT,
        "/api/rentals/999",
        Some(json!({"end_date": "2024-06-10"})),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_rejected() -> Result<(), String> {
    let router = test_router(true).await?;
    seed_graph(&router).await?;

    let (status, body) = api_request(
        &router,
        Method::POST,
        "/api/customers",
        Some(json!({"name": "Imposter", "email": "ada@example.com", "phone": "0"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Email address is already registered to another customer."
    );
    Ok(())
}

#[tokio::test]
async fn reset_db_clears_everything() -> Result<(), String> {
    let router = test_router(true).await?;
    seed_graph(&router).await?;

    let (status, body) = api_request(&router, Method::GET, "/api/reset-db", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Database reset successfully!"));

    for uri in ["/api/branches", "/api/cars", "/api/customers", "/api/rentals"] {
        let (status, body) = api_request(&router, Method::GET, uri, None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]), "GET {uri}");
    }
    Ok(())
}

#[tokio::test]
async fn reset_db_can_be_disabled() -> Result<(), String> {
    let router = test_router(false).await?;

    let (status, body) = api_request(&router, Method::GET, "/api/reset-db", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn health_reports_database() -> Result<(), String> {
    let router = test_router(true).await?;

    let (status, body) = api_request(&router, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "database": true}));
    Ok(())
}

#[tokio::test]
async fn unknown_routes_and_ids_return_json_404() -> Result<(), String> {
    let router = test_router(true).await?;

    for uri in ["/api/trucks", "/api/cars/not-a-number", "/api/customers/77"] {
        let (status, body) = api_request(&router, Method::GET, uri, None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {uri}");
        assert_eq!(body["code"], "NOT_FOUND", "GET {uri}");
    }

    let (status, _) = api_request(&router, Method::DELETE, "/api/rentals/5", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = api_request(&router, Method::PATCH, "/api/branches", None).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() -> Result<(), String> {
    let router = test_router(true).await?;

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/branches")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .map_err(|err| format!("build request: {err}"))?;
    let (status, body) = send(&router, req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/branches")
        .body(Body::from(r#"{"name": "x", "location": "y"}"#))
        .map_err(|err| format!("build request: {err}"))?;
    let (status, _) = send(&router, req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = api_request(
        &router,
        Method::POST,
        "/api/cars",
        Some(json!({
            "make": "Ford",
            "model": "Focus",
            "year": "last year",
            "rental_rate": 35.0,
            "branch_id": 1
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn customer_update_to_taken_email_is_rejected() -> Result<(), String> {
    let router = test_router(true).await?;
    seed_graph(&router).await?;

    let (status, second) = api_request(
        &router,
        Method::POST,
        "/api/customers",
        Some(json!({"name": "Grace", "email": "grace@example.com", "phone": "555-0102"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let second_id = second["id"].as_i64().ok_or("customer id")?;

    let (status, body) = api_request(
        &router,
        Method::PUT,
        &format!("/api/customers/{second_id}"),
        Some(json!({"email": "ada@example.com"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Email address is already registered to another customer."
    );
    assert_eq!(body["code"], "INTEGRITY_ERROR");

    let (_, stored) = api_request(
        &router,
        Method::GET,
        &format!("/api/customers/{second_id}"),
        None,
    )
    .await?;
    assert_eq!(stored["email"], "grace@example.com");
    Ok(())
}

#[tokio::test]
async fn update_of_missing_row_is_not_found() -> Result<(), String> {
    let router = test_router(true).await?;

    for (uri, payload) in [
        ("/api/branches/999", json!({"name": "Nowhere"})),
        ("/api/cars/999", json!({"model": "Ghost"})),
        ("/api/customers/999", json!({"phone": "0"})),
        ("/api/rentals/999", json!({"end_date": "2024-06-10"})),
    ] {
        let (status, body) = api_request(&router, Method::PUT, uri, Some(payload)).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {uri}");
        assert_eq!(body["code"], "NOT_FOUND", "PUT {uri}");
    }

    // The row lookup wins over a malformed body
    let req = Request::builder()
        .method(Method::PUT)
        .uri("/api/cars/999")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .map_err(|err| format!("build request: {err}"))?;
    let (status, body) = send(&router, req).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    // An existing row with a malformed body is still a bad request
    let (_, car_id, _, _) = seed_graph(&router).await?;
    let req = Request::builder()
        .method(Method::PUT)
        .uri(format!("/api/cars/{car_id}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .map_err(|err| format!("build request: {err}"))?;
    let (status, body) = send(&router, req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    Ok(())
}
