//! Router assembly: entity routes, health endpoints and the HTTP middleware stack.

mod common;
mod entity;

pub use common::common_routes_with_ready;
pub use entity::entity_routes;

use crate::config::AppConfig;
use crate::state::AppState;
use axum::Router;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Request bodies above this size are rejected with 413.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Full application router. Layers run trace, then body limit, then timeout.
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(entity_routes(state.clone()))
        .merge(common_routes_with_ready(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(TimeoutLayer::new(request_timeout)),
        )
}

pub fn app_router_from_config(state: AppState, config: &AppConfig) -> Router {
    app_router(state, config.request_timeout)
}
