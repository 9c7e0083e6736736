//! Session configuration: batch size, animation timing and oracle settings.
//!
//! Loaded from a JSON file or built in code with the `with_*` helpers. Every
//! field has a default, so a partial file is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::clock::DEFAULT_TICK_PERIOD_MS;

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_TRIP_DURATION_MS: u64 = 15_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Where and how to reach the scoring oracle.
///
/// The API key itself is never part of the config; only the name of the
/// environment variable that holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Orders generated per refresh.
    pub batch_size: usize,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub tick_period_ms: u64,
    /// Wall-clock length of a simulated trip.
    pub trip_duration_ms: u64,
    pub oracle: OracleConfig,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            trip_duration_ms: DEFAULT_TRIP_DURATION_MS,
            oracle: OracleConfig::default(),
        }
    }
}

impl DispatchConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be positive".into()));
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::Invalid("tick_period_ms must be positive".into()));
        }
        if self.trip_duration_ms < self.tick_period_ms {
            return Err(ConfigError::Invalid(format!(
                "trip_duration_ms ({}) is shorter than one tick ({} ms)",
                self.trip_duration_ms, self.tick_period_ms
            )));
        }
        Ok(())
    }

    /// Ticks a full trip takes; the per-tick progress step is its inverse.
    pub fn ticks_per_trip(&self) -> u64 {
        (self.trip_duration_ms / self.tick_period_ms.max(1)).max(1)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_timing(mut self, tick_period_ms: u64, trip_duration_ms: u64) -> Self {
        self.tick_period_ms = tick_period_ms;
        self.trip_duration_ms = trip_duration_ms;
        self
    }

    pub fn with_oracle(mut self, oracle: OracleConfig) -> Self {
        self.oracle = oracle;
        self
    }
}
