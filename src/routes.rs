//! Route definitions and router setup
//!
//! Configures all API routes and middleware.

mod record;

use crate::models::HealthResponse;
use crate::state::SharedState;
use axum::{
    http::Method,
    routing::{get, put},
    Json, Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::Level;

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .layer(build_cors_layer())
        .propagate_x_request_id();

    Router::new()
        .route("/health", get(health_check))
        .route("/create-table", get(record::create_table))
        .route("/data", get(record::list_records).post(record::create_record))
        .route("/data/{id}", put(record::update_record).delete(record::delete_record))
        .layer(middleware)
        .with_state(state)
}

/// CORS open to every origin
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::running())
}
