//! HTTP API server with observability for the order management system.
//!
//! Provides REST endpoints for order CRUD with filtering, with structured
//! logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use application::OrderHandlers;
use axum::Router;
use axum::routing::{delete, get, post, put};
use metrics_exporter_prometheus::PrometheusHandle;
use storage::OrderRepository;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R: OrderRepository + 'static>(
    state: Arc<AppState<R>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/orders", post(routes::orders::create::<R>))
        .route("/orders", get(routes::orders::list::<R>))
        .route("/orders/{id}", get(routes::orders::get::<R>))
        .route("/orders/{id}", put(routes::orders::update::<R>))
        .route("/orders/{id}", delete(routes::orders::delete::<R>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state for the given repository.
pub fn create_state<R: OrderRepository + 'static>(repository: R) -> Arc<AppState<R>> {
    Arc::new(AppState {
        handlers: OrderHandlers::new(repository),
    })
}
