//! # Aerodex Web
//!
//! HTTP surface for the airport lookup.
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /api/v1/airports/{icao}` | Facility details, or a problem document |
//! | `GET /actuator/health` | Provider name, circuit state, cache size |
//! | `GET /v3/api-docs` | OpenAPI 3 description |
//!
//! Failures are rendered as `application/problem+json`: invalid codes are
//! 400, unknown codes 404, an unavailable upstream 503, and anything else
//! (including a panicking handler) 500.

pub mod config;
pub mod error;
pub mod openapi;
pub mod routes;

use std::sync::Arc;

use aerodex_core::FacilityLookup;
use axum::body::Body;
use axum::http::{HeaderName, Request};
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use config::Settings;
pub use error::{ApiError, Problem, ServerError};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<FacilityLookup>,
}

impl AppState {
    pub fn new(lookup: FacilityLookup) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }
}

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/v1/airports/:icao", get(routes::get_airport))
        .route("/actuator/health", get(routes::health))
        .route("/v3/api-docs", get(routes::api_docs))
        .with_state(state);

    with_middleware(routes)
}

/// Wraps a router with request ids, tracing, panic recovery and CORS.
pub fn with_middleware(router: Router) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = request_id
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(CatchPanicLayer::custom(error::panic_response))
            .layer(CorsLayer::permissive()),
    )
}
