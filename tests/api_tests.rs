use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use cinepick_api::api::{create_router, AppState, REQUEST_ID_HEADER};

fn create_test_app() -> Router {
    create_router(AppState::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn catalog() -> Value {
    json!([
        { "id": 1, "name": "Action" },
        { "id": 2, "name": "Comedy" }
    ])
}

fn candidates() -> Value {
    json!([
        {
            "id": 200,
            "title": "Die Hard",
            "categories": [{ "id": 1, "name": "Action" }],
            "popularity": 80.0,
            "qualityScore": 8.0
        },
        {
            "id": 201,
            "title": "Clue",
            "categories": [{ "id": 2, "name": "Comedy" }],
            "popularity": 10.0,
            "qualityScore": 5.0
        }
    ])
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = create_test_app();
    let request = Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, "abc-123")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
}

#[tokio::test]
async fn test_recommendations_with_inline_history() {
    let app = create_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/recommendations",
        Some(json!({
            "categories": catalog(),
            "candidates": candidates(),
            "history": [{ "id": 100, "categories": [{ "id": 1, "name": "Action" }], "rating": 5 }],
            "topN": 2
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["coldStart"], false);
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["id"], 200);
    assert_eq!(recs[1]["id"], 201);
    assert!(recs[0]["score"].as_f64().unwrap() > recs[1]["score"].as_f64().unwrap());
    assert!(recs[0]["explanation"].as_str().unwrap().contains("Action"));
    assert_eq!(recs[0]["title"], "Die Hard");
}

#[tokio::test]
async fn test_cold_start_recommendations() {
    let app = create_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/recommendations",
        Some(json!({ "categories": catalog(), "candidates": candidates() })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["coldStart"], true);
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs[0]["id"], 200);
    assert!((recs[0]["score"].as_f64().unwrap() - 0.08).abs() < 1e-12);
    assert!((recs[1]["score"].as_f64().unwrap() - 0.01).abs() < 1e-12);
}

#[tokio::test]
async fn test_recommendations_use_stored_history() {
    let app = create_test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/history",
        Some(json!({ "id": 201, "categories": [{ "id": 2, "name": "Comedy" }], "liked": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/recommendations",
        Some(json!({ "categories": catalog(), "candidates": candidates() })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["coldStart"], false);
    let recs = body["recommendations"].as_array().unwrap();
    // Already watched item is never recommended
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["id"], 200);
}

#[tokio::test]
async fn test_top_n_zero_and_over_limit() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/recommendations",
        Some(json!({ "categories": catalog(), "candidates": candidates(), "topN": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["recommendations"].as_array().unwrap().is_empty());

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/recommendations",
        Some(json!({ "categories": catalog(), "candidates": candidates(), "topN": 1000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("topN"));
}

#[tokio::test]
async fn test_history_flow() {
    let app = create_test_app();

    for entry in [
        json!({ "id": 1, "categories": [{ "id": 1, "name": "Action" }], "viewedAt": "2024-05-02T10:00:00Z" }),
        json!({ "id": 2, "categories": [{ "id": 2, "name": "Comedy" }], "observedAt": "2024-06-02T10:00:00Z" }),
        json!({ "id": 1, "rating": 2 }),
    ] {
        let (status, _) = send(&app, "POST", "/api/v1/history", Some(entry)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/api/v1/history", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["rating"], 2);
    assert_eq!(entries[0]["categories"][0]["name"], "Action");

    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/history/2/rating",
        Some(json!({ "rating": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["liked"], true);

    let (status, body) = send(&app, "GET", "/api/v1/history/analytics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalWatched"], 2);
    assert_eq!(body["ratedCount"], 2);
    assert_eq!(body["averageRating"], 3.5);
    assert_eq!(body["ratingsDistribution"]["5"], 1);

    let (status, _) = send(&app, "DELETE", "/api/v1/history/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", "/api/v1/history/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_rating_errors() {
    let app = create_test_app();

    let (status, _) = send(
        &app,
        "PUT",
        "/api/v1/history/42/rating",
        Some(json!({ "rating": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, "POST", "/api/v1/history", Some(json!({ "id": 42 }))).await;
    let (status, _) = send(
        &app,
        "PUT",
        "/api/v1/history/42/rating",
        Some(json!({ "rating": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_reject_inline_rating_out_of_range() {
    let app = create_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/recommendations",
        Some(json!({
            "categories": catalog(),
            "candidates": candidates(),
            "history": [{ "id": 100, "categories": [{ "id": 1, "name": "Action" }], "rating": 0 }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Rating"));
}
