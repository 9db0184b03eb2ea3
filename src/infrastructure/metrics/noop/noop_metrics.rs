use crate::domain::Metrics;
use std::time::Instant;

/// No-op metrics implementation.
#[derive(Default)]
pub struct NoopMetrics;

impl NoopMetrics {
    pub fn new() -> Self {
        NoopMetrics
    }
}

impl Metrics for NoopMetrics {
    // ---
    fn render(&self) -> anyhow::Result<String> {
        Ok(String::new())
    }
    fn record_http_request(&self, _: Instant, _: &str, _: &str) {}
}
