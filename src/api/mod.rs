//! REST API layer: route handlers, DTOs, docs and router composition.
//!
//! Every route is mounted under the configured `API_PREFIX`, which may be
//! empty.

pub mod auth;
pub mod docs;
pub mod dto;
pub mod handlers;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints, the docs and the
/// 404 fallback.
pub fn build_router(state: &AppState) -> Router<AppState> {
    let config = &state.config;
    let routes = handlers::routes(state);
    let router = if config.api_prefix.is_empty() {
        routes
    } else {
        Router::new().nest(&config.api_prefix, routes)
    };

    router
        .merge(docs::routes(config))
        .fallback(handlers::system::not_found)
}

/// The served application: [`build_router`] plus tracing and CORS layers,
/// with the state attached.
pub fn app(state: AppState) -> Router {
    build_router(&state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
