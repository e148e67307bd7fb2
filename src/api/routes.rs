use axum::{
    body::Body,
    http::{HeaderName, Request},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::AppState;

/// HTTP header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Creates the main API router with all routes
///
/// Every request gets an `x-request-id` (kept if the client sent one),
/// recorded on its tracing span and echoed on the response.
pub fn create_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/recommendations", post(handlers::recommend))
        // Watch history
        .route(
            "/history",
            get(handlers::get_history).post(handlers::add_history_entry),
        )
        .route("/history/analytics", get(handlers::get_analytics))
        .route("/history/:id", delete(handlers::remove_history_entry))
        .route("/history/:id/rating", put(handlers::update_rating))
}

fn make_span_with_request_id(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
