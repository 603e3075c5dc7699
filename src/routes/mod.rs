//! HTTP routes for Keygate
//!
//! Per-provider catch-all routes plus liveness endpoints. The health
//! routes bypass every proxy instance.

pub mod forward;
pub mod health;

use std::sync::Arc;

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{proxy::ProxyInstance, AppState};

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(state.clone());

    for instance in &state.instances {
        router = router.merge(provider_routes(instance.clone()));
    }

    router.layer(TraceLayer::new_for_http())
}

/// Catch-all routes under one provider's path prefix. Axum wildcards
/// need a non-empty tail, so the bare prefix gets its own route.
fn provider_routes(instance: Arc<ProxyInstance>) -> Router {
    let prefix = instance.config().path_prefix.clone();
    Router::new()
        .route(&prefix, any(forward::forward))
        .route(&format!("{prefix}/*path"), any(forward::forward))
        .with_state(instance)
}
