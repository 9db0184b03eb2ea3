//! Prometheus metrics implementation.
//!
//! This module provides a concrete implementation of the `Metrics` trait on
//! top of the `prometheus` crate. Unlike a process-wide recorder, every
//! `PrometheusMetrics` owns its `Registry`; the instance is injected into
//! handlers through `AppState`, so nothing here is global.
//!
//! The instruments are lock-free atomics, which keeps them safe under the
//! multi-threaded axum server without extra synchronization.

use super::instruments::{request_counter, request_latency};
use crate::domain::{Metrics, REQUEST_COUNT_NAME, REQUEST_LATENCY_NAME};
use prometheus::{Encoder, HistogramVec, IntCounterVec, Registry, TextEncoder};
use std::time::Instant;

/// Prometheus-based metrics implementation.
pub struct PrometheusMetrics {
    registry: Registry,
    requests: IntCounterVec,
    latency: HistogramVec,
}

impl PrometheusMetrics {
    /// Build a fresh registry holding the request counter and latency histogram.
    pub fn new() -> prometheus::Result<Self> {
        tracing::info!("Creating Prometheus metrics");
        let registry = Registry::new();
        let requests = request_counter(&registry)?;
        let latency = request_latency(&registry)?;

        Ok(PrometheusMetrics {
            registry,
            requests,
            latency,
        })
    }

    /// Current value of the request counter for `(method, endpoint)`.
    ///
    /// Read from the gathered exposition, so asking about a label pair that
    /// was never recorded does not create a zero-valued series.
    pub fn request_count(&self, method: &str, endpoint: &str) -> u64 {
        self.sample(REQUEST_COUNT_NAME, &[("method", method), ("endpoint", endpoint)])
    }

    /// Number of latency samples recorded for `endpoint`.
    pub fn latency_sample_count(&self, endpoint: &str) -> u64 {
        self.sample(
            &format!("{REQUEST_LATENCY_NAME}_count"),
            &[("endpoint", endpoint)],
        )
    }

    /// Value of the `series{..}` line carrying every label in `labels`, or 0.
    fn sample(&self, series: &str, labels: &[(&str, &str)]) -> u64 {
        let text = match self.render() {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("Failed to render metrics: {err:#}");
                return 0;
            }
        };
        let prefix = format!("{series}{{");
        let wanted: Vec<String> = labels
            .iter()
            .map(|(name, value)| format!("{name}=\"{value}\""))
            .collect();

        text.lines()
            .filter(|line| line.starts_with(&prefix))
            .find(|line| wanted.iter().all(|label| line.contains(label.as_str())))
            .and_then(|line| line.rsplit(' ').next())
            .and_then(|value| value.parse::<f64>().ok())
            .map_or(0, |value| value as u64)
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;

        Ok(String::from_utf8(buffer)?)
    }

    fn record_http_request(&self, start: Instant, method: &str, endpoint: &str) {
        tracing::debug!(method, endpoint, "Recording HTTP request");
        self.requests.with_label_values(&[method, endpoint]).inc();
        self.latency
            .with_label_values(&[endpoint])
            .observe(start.elapsed().as_secs_f64());
    }
}
