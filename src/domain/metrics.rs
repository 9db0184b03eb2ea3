use std::sync::Arc;
use std::time::Instant;

/// Name of the request counter instrument, labeled by `method` and `endpoint`.
pub const REQUEST_COUNT_NAME: &str = "http_requests_total";

/// Name of the latency histogram instrument, labeled by `endpoint`.
pub const REQUEST_LATENCY_NAME: &str = "http_request_latency_seconds";

/// Abstraction for application metrics (request counter, latency histogram).
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current metrics in Prometheus text exposition format.
    fn render(&self) -> anyhow::Result<String>;

    /// Count one handled request and record its latency since `start`.
    ///
    /// The counter and the histogram are always updated together, so the
    /// histogram sample count for an endpoint tracks the counter total.
    fn record_http_request(&self, start: Instant, method: &str, endpoint: &str);
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
