pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod service;
pub mod upstream;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes::api_routes::{health_handler, relay_handler, roadmap_handler};
use crate::service::relay_service::RelayService;

/// Builds the HTTP router with every route and layer wired to `relay`.
pub fn app(relay: RelayService) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/ai", post(relay_handler))
        .route("/api/roadmap", post(roadmap_handler))
        .layer(TraceLayer::new_for_http())
        // The Leptos client is served from its own origin during development.
        .layer(CorsLayer::permissive())
        .with_state(relay)
}
