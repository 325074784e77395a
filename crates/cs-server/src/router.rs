use axum::routing::{get, post};
use axum::Router;
use cs_registry::Registry;
use tower_http::trace::TraceLayer;

use crate::endpoint::endpoints;
use crate::handler;

/// Build the axum router with all registry endpoints.
pub fn build_router(registry: Registry) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(handler::health_handler))
        .route(endpoints::INFO, get(handler::info_handler))
        .route(endpoints::CODESPACES, post(handler::create_handler))
        .route(endpoints::DETAILS, get(handler::details_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}
