//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. It is cheap to clone: the only
//! resource it carries is an `Arc` around the metrics implementation.

use crate::domain::MetricsPtr;

/// Shared application state passed to all Axum handlers.
///
/// The metrics registry is constructed once at startup and injected here
/// rather than living in a process-wide static, so each router owns its
/// own instruments.
#[derive(Clone)]
pub(crate) struct AppState {
    /// Metrics implementation for recording request counts and latency.
    ///
    /// Either Prometheus-backed or no-op, depending on configuration.
    metrics: MetricsPtr,
}

impl AppState {
    // ---

    pub fn new(metrics: MetricsPtr) -> Self {
        // ---
        AppState { metrics }
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }
}
