// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! Configuration is read once at startup. A value that is present but
//! cannot be parsed is a deployment error and aborts startup; only a
//! missing value falls back to its default.

use anyhow::Result;
use std::net::{Ipv4Addr, SocketAddr};
use std::num::NonZeroU16;
use std::str::FromStr;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads an optional environment variable and parses it strictly.
///
/// # Behavior
/// - Missing variable: the provided default is used
/// - Present but unparsable: fails with a message naming the variable
///
/// Surrounding whitespace is trimmed before parsing.
macro_rules! parsed_env_or {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        match std::env::var($key) {
            Ok(raw) => raw.trim().parse::<$ty>().map_err(|err| {
                anyhow::anyhow!(concat!("Invalid configuration: ", $key, "={:?} ({})"), raw, err)
            })?,
            Err(_) => $default,
        }
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor rejects the value of `$key`.
macro_rules! assert_invalid_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Invalid configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated configuration for the framework variant.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listener: listener::ListenerConfig,
    pub metrics: metrics::MetricsConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any present variable fails to parse.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            listener: listener::ListenerConfig::from_env()?,
            metrics: metrics::MetricsConfig::from_env()?,
        })
    }
}

// ============================================================
// Listener configuration
// ============================================================

mod listener {
    // ---
    use super::*;

    /// Default TCP port when `PORT` is not set.
    pub const DEFAULT_PORT: u16 = 8080;

    const DEFAULT_NONZERO_PORT: NonZeroU16 = match NonZeroU16::new(DEFAULT_PORT) {
        Some(port) => port,
        None => panic!("DEFAULT_PORT must be non-zero"),
    };

    /// Where the HTTP listener binds. Shared by both server variants.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ListenerConfig {
        /// TCP port, from `PORT`. Defaults to 8080.
        pub port: u16,
    }

    impl ListenerConfig {
        /// Builds a [`ListenerConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `PORT` is set but is not a valid port number.
        /// Port 0 is rejected: it would bind a random ephemeral port.
        pub fn from_env() -> Result<Self> {
            // ---
            let port = parsed_env_or!("PORT", NonZeroU16, DEFAULT_NONZERO_PORT);

            Ok(Self { port: port.get() })
        }

        /// Socket address on all IPv4 interfaces for the configured port.
        pub fn bind_addr(&self) -> SocketAddr {
            // ---
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
        }
    }

    impl Default for ListenerConfig {
        fn default() -> Self {
            Self { port: DEFAULT_PORT }
        }
    }
}
pub use listener::{ListenerConfig, DEFAULT_PORT};

// ============================================================
// Metrics configuration
// ============================================================

mod metrics {
    // ---
    use super::*;

    /// Which metrics implementation backs the `/metrics` endpoint.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum MetricsBackend {
        /// Prometheus registry with the request counter and latency histogram.
        #[default]
        Prometheus,
        /// Records nothing and renders an empty exposition.
        Noop,
    }

    impl FromStr for MetricsBackend {
        type Err = anyhow::Error;

        fn from_str(s: &str) -> Result<Self> {
            match s.to_ascii_lowercase().as_str() {
                "prom" | "prometheus" => Ok(Self::Prometheus),
                "noop" | "none" => Ok(Self::Noop),
                other => Err(anyhow::anyhow!(
                    "unknown metrics backend {other:?}, expected \"prom\" or \"noop\""
                )),
            }
        }
    }

    #[derive(Debug, Clone, Default)]
    pub struct MetricsConfig {
        /// Backend selected by `SECURE_APP_METRICS`. Defaults to Prometheus.
        pub backend: MetricsBackend,
    }

    impl MetricsConfig {
        /// Builds a [`MetricsConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `SECURE_APP_METRICS` names an unknown backend.
        pub fn from_env() -> Result<Self> {
            // ---
            let backend = parsed_env_or!("SECURE_APP_METRICS", MetricsBackend, MetricsBackend::default());

            Ok(Self { backend })
        }
    }
}
pub use metrics::{MetricsBackend, MetricsConfig};

// ============================================================
// Tests
// ============================================================
