use crate::domain::{REQUEST_COUNT_NAME, REQUEST_LATENCY_NAME};
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

/// Latency buckets in seconds, finest at the low end where a static
/// handler lands.
pub const LATENCY_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Build the request counter and register it with `registry`.
pub fn request_counter(registry: &Registry) -> prometheus::Result<IntCounterVec> {
    let counter = IntCounterVec::new(
        Opts::new(REQUEST_COUNT_NAME, "Total HTTP requests"),
        &["method", "endpoint"],
    )?;
    registry.register(Box::new(counter.clone()))?;
    Ok(counter)
}

/// Build the latency histogram and register it with `registry`.
pub fn request_latency(registry: &Registry) -> prometheus::Result<HistogramVec> {
    let histogram = HistogramVec::new(
        HistogramOpts::new(REQUEST_LATENCY_NAME, "HTTP request latency")
            .buckets(LATENCY_BUCKETS.to_vec()),
        &["endpoint"],
    )?;
    registry.register(Box::new(histogram.clone()))?;
    Ok(histogram)
}
