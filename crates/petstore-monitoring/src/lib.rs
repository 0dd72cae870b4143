//! Simplified monitoring module for the pet store suite.
//!
//! Only logging is provided: library crates emit `tracing` events and the
//! runners call [`init_logging`] once at startup.

use serde::{Deserialize, Serialize};

pub mod logging;

pub use logging::{init_logging, LogExt};

/// Output format of the log layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Configuration for initializing logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Service name attached to the startup event
    pub service_name: String,
    /// Filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

impl MonitoringConfig {
    /// Configuration for `service_name` logging at `level` and above.
    ///
    /// Dependencies that are noisy at debug level are kept at `warn`.
    pub fn for_service(service_name: impl Into<String>, level: &str) -> Self {
        Self {
            service_name: service_name.into(),
            log_filter: format!("{level},hyper=warn,reqwest=warn,tower_http=warn"),
            format: LogFormat::default(),
        }
    }

    /// Switch to JSON output.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self::for_service("petstore", "info")
    }
}
