// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{routing::get, Router};

use handlers::{metrics_handler, root_handler};

// Public exports (visible outside this module)
pub mod bare;
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;
mod logging;
mod server;

pub use config::*;
pub use handlers::METRICS_CONTENT_TYPE;
pub use logging::init_tracing;
pub use server::{bind, serve, shutdown_signal};

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_noop_metrics, // ---
    create_prom_metrics,
};
pub use infrastructure::metrics::{noop::NoopMetrics, prometheus::PrometheusMetrics};

/// Build the metrics implementation selected by configuration.
pub fn create_metrics(config: &MetricsConfig) -> Result<domain::MetricsPtr> {
    // ---
    match config.backend {
        MetricsBackend::Prometheus => create_prom_metrics(),
        MetricsBackend::Noop => create_noop_metrics(),
    }
}

/// Build the HTTP router for the framework variant.
///
/// `GET /` serves the greeting and records metrics; `GET /metrics` renders
/// them. Anything else gets axum's default 404 or 405.
pub fn create_router(metrics: domain::MetricsPtr) -> Router {
    // ---
    Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(AppState::new(metrics))
}
