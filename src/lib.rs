//! Humanivio API: rewrites submitted text through a chat completion service
//! so it reads as human-written, behind a per-client daily quota.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod state;
pub mod upstream;
pub mod validate;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{health_handler, humanize_handler, metrics_handler, root_handler};
use crate::state::AppState;

// Router with every route, CORS open to any origin
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/health", get(health_handler))
        .route("/api/humanize", post(humanize_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
