mod greeting;
mod metrics;

pub use greeting::GREETING;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr, REQUEST_COUNT_NAME, REQUEST_LATENCY_NAME};
