// src/infrastructure/metrics/noop/mod.rs
mod noop_metrics;

pub use noop_metrics::NoopMetrics;
use std::sync::Arc;

/// Creates a new no-op metrics implementation.
///
/// All metrics calls are ignored and `/metrics` renders an empty body.
/// Selected with `SECURE_APP_METRICS=noop`.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!("Metrics disabled, using no-op backend");
    Ok(Arc::new(NoopMetrics::new()))
}
