//! Configuration for the pet store suite
//!
//! Values start from defaults matching the public demo API, may be replaced
//! by a YAML file named in `PETSTORE_CONFIG`, and are finally overridden by
//! individual environment variables.

use std::env;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::pet::{PetId, DEFAULT_PET_ID};
use crate::error::{CoreError, CoreResult};
use crate::verification::RetryPolicy;

/// Environment variable naming an optional YAML configuration file
pub const CONFIG_FILE_VAR: &str = "PETSTORE_CONFIG";

/// Suite configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetstoreConfig {
    /// Base address of the pet store API, without the `/pet` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Identifier shared by the scenarios
    #[serde(default = "default_pet_id")]
    pub pet_id: PetId,

    /// Fetches made by a verification before it fails
    #[serde(default = "default_verify_attempts")]
    pub verify_attempts: u32,

    /// Base wait between verification attempts
    #[serde(default = "default_verify_interval_ms")]
    pub verify_interval_ms: u64,

    /// Growth factor of the wait; 1 keeps it fixed
    #[serde(default = "default_verify_backoff_multiplier")]
    pub verify_backoff_multiplier: u32,

    /// Cap on a single wait when backing off
    #[serde(default = "default_verify_max_interval_ms")]
    pub verify_max_interval_ms: u64,

    /// Pause after each create, update or delete
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Timeout applied to every HTTP request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_base_url() -> String {
    "https://petstore.swagger.io/v2".to_string()
}

fn default_pet_id() -> PetId {
    DEFAULT_PET_ID
}

fn default_verify_attempts() -> u32 {
    RetryPolicy::DEFAULT_MAX_ATTEMPTS
}

fn default_verify_interval_ms() -> u64 {
    10_000
}

fn default_verify_backoff_multiplier() -> u32 {
    1
}

fn default_verify_max_interval_ms() -> u64 {
    60_000
}

fn default_settle_delay_ms() -> u64 {
    10_000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PetstoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            pet_id: default_pet_id(),
            verify_attempts: default_verify_attempts(),
            verify_interval_ms: default_verify_interval_ms(),
            verify_backoff_multiplier: default_verify_backoff_multiplier(),
            verify_max_interval_ms: default_verify_max_interval_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl PetstoreConfig {
    /// Load configuration from the optional config file and environment variables
    pub fn load() -> CoreResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_FILE_VAR) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_overrides(&lookup);
        config.validate()?;

        info!(
            base_url = %config.base_url,
            pet_id = config.pet_id,
            verify_attempts = config.verify_attempts,
            verify_interval_ms = config.verify_interval_ms,
            "Loaded pet store configuration"
        );

        Ok(config)
    }

    /// Read a YAML configuration file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigurationError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("PETSTORE_BASE_URL") {
            self.base_url = base_url;
        }

        override_parsed(lookup, "PETSTORE_PET_ID", &mut self.pet_id);
        override_parsed(lookup, "PETSTORE_VERIFY_ATTEMPTS", &mut self.verify_attempts);
        override_parsed(lookup, "PETSTORE_VERIFY_INTERVAL_MS", &mut self.verify_interval_ms);
        override_parsed(
            lookup,
            "PETSTORE_VERIFY_BACKOFF_MULTIPLIER",
            &mut self.verify_backoff_multiplier,
        );
        override_parsed(
            lookup,
            "PETSTORE_VERIFY_MAX_INTERVAL_MS",
            &mut self.verify_max_interval_ms,
        );
        override_parsed(lookup, "PETSTORE_SETTLE_DELAY_MS", &mut self.settle_delay_ms);
        override_parsed(
            lookup,
            "PETSTORE_REQUEST_TIMEOUT_SECS",
            &mut self.request_timeout_secs,
        );

        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.log_level = log_level;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(CoreError::ConfigurationError(
                "base_url must not be empty".to_string(),
            ));
        }
        if self.verify_attempts == 0 {
            return Err(CoreError::ConfigurationError(
                "verify_attempts must be at least 1".to_string(),
            ));
        }
        self.retry_policy()
            .map(|_| ())
            .map_err(|e| CoreError::ConfigurationError(e.to_string()))
    }

    /// Retry policy for verification loops.
    pub fn retry_policy(&self) -> CoreResult<RetryPolicy> {
        RetryPolicy::exponential(
            self.verify_attempts,
            Duration::from_millis(self.verify_interval_ms),
            self.verify_backoff_multiplier,
            Duration::from_millis(self.verify_max_interval_ms.max(self.verify_interval_ms)),
        )
    }

    /// Pause after mutating calls.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Timeout for each HTTP request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn override_parsed<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse::<T>() {
            Ok(value) => *target = value,
            Err(_) => warn!("Invalid {} value: {}", key, raw),
        }
    }
}
