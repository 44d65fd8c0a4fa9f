//! Node configuration
//!
//! Loaded once at startup: defaults, then an optional JSON file, then
//! `AIRWATCH_*` environment variables. Nothing is re-read while running.

use airwatch_connectors::http::{HttpConfig, DEFAULT_TIMEOUT_SECS};
use airwatch_connectors::LinkConfig;
use airwatch_core::constants::{DEFAULT_SAMPLING_PERIOD_MS, MS_PER_SECOND};
use airwatch_core::{AmbientReading, CalibrationSet};
use airwatch_schemas::DEFAULT_DEVICE_ID;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "http://192.168.99.14:5000/data";

pub const ENV_DEVICE_ID: &str = "AIRWATCH_DEVICE_ID";
pub const ENV_SAMPLING_PERIOD: &str = "AIRWATCH_SAMPLING_PERIOD_SECS";
pub const ENV_WIFI_SSID: &str = "AIRWATCH_WIFI_SSID";
pub const ENV_WIFI_PASSWORD: &str = "AIRWATCH_WIFI_PASSWORD";
pub const ENV_RETRY_INTERVAL: &str = "AIRWATCH_RETRY_INTERVAL_SECS";
pub const ENV_ENDPOINT: &str = "AIRWATCH_ENDPOINT";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{var}={value:?} is not a valid value")]
    Env { var: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Where telemetry is delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Complete node configuration; every field has a default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub device_id: String,
    pub sampling_period_secs: u64,
    pub network: LinkConfig,
    pub endpoint: EndpointConfig,
    pub calibration: CalibrationSet,
    /// Pair used when the ambient sensor cannot be read
    pub ambient_fallback: AmbientReading,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            device_id: DEFAULT_DEVICE_ID.to_string(),
            sampling_period_secs: DEFAULT_SAMPLING_PERIOD_MS / MS_PER_SECOND,
            network: LinkConfig::default(),
            endpoint: EndpointConfig::default(),
            calibration: CalibrationSet::default(),
            ambient_fallback: AmbientReading::default(),
        }
    }
}

impl NodeConfig {
    /// Defaults, overlaid by `path` if given, then by the process environment.
    /// The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        config.apply_env_from(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Apply `AIRWATCH_*` overrides read through `lookup`
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_DEVICE_ID) {
            self.device_id = v;
        }
        if let Some(v) = lookup(ENV_SAMPLING_PERIOD) {
            self.sampling_period_secs = parse_env(ENV_SAMPLING_PERIOD, v)?;
        }
        if let Some(v) = lookup(ENV_WIFI_SSID) {
            self.network.credentials.ssid = v;
        }
        if let Some(v) = lookup(ENV_WIFI_PASSWORD) {
            self.network.credentials.password = v;
        }
        if let Some(v) = lookup(ENV_RETRY_INTERVAL) {
            self.network.retry_interval_secs = parse_env(ENV_RETRY_INTERVAL, v)?;
        }
        if let Some(v) = lookup(ENV_ENDPOINT) {
            self.endpoint.url = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device_id.trim().is_empty() {
            return Err(ConfigError::Invalid("device_id is empty".into()));
        }
        if self.sampling_period_secs == 0 {
            return Err(ConfigError::Invalid("sampling_period_secs must be > 0".into()));
        }
        if self.network.max_polls == 0 {
            return Err(ConfigError::Invalid("network.max_polls must be > 0".into()));
        }
        let url = &self.endpoint.url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "endpoint.url {:?} must start with http:// or https://",
                url
            )));
        }
        if self.endpoint.timeout_secs == 0 {
            return Err(ConfigError::Invalid("endpoint.timeout_secs must be > 0".into()));
        }
        if self.endpoint.timeout_secs >= self.sampling_period_secs {
            return Err(ConfigError::Invalid(format!(
                "endpoint.timeout_secs ({}) must be shorter than sampling_period_secs ({})",
                self.endpoint.timeout_secs, self.sampling_period_secs
            )));
        }
        // worst case of one cycle: a full association wait, then a request
        // that runs into its timeout
        let association_ms =
            u64::from(self.network.max_polls) * u64::from(self.network.poll_interval_ms);
        let worst_case_ms =
            association_ms.saturating_add(self.endpoint.timeout_secs.saturating_mul(MS_PER_SECOND));
        if worst_case_ms > self.sampling_period_ms() {
            return Err(ConfigError::Invalid(format!(
                "association ({} ms) plus request timeout ({} s) exceeds the {} s sampling period",
                association_ms, self.endpoint.timeout_secs, self.sampling_period_secs
            )));
        }
        for (name, params) in [("co", &self.calibration.co), ("co2", &self.calibration.co2)] {
            params.check().map_err(|field| {
                ConfigError::Invalid(format!("calibration.{}.{} is out of range", name, field))
            })?;
        }
        Ok(())
    }

    pub fn sampling_period_ms(&self) -> u64 {
        self.sampling_period_secs.saturating_mul(MS_PER_SECOND)
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::new(self.endpoint.url.clone()).timeout_secs(self.endpoint.timeout_secs)
    }
}

fn parse_env<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_match_device() {
        let config = NodeConfig::default();
        assert_eq!(config.device_id, "esp32_air_monitor_1");
        assert_eq!(config.sampling_period_ms(), 30_000);
        assert_eq!(config.network.retry_interval_secs, 60);
        assert_eq!(config.endpoint.url, DEFAULT_ENDPOINT);
        assert_eq!(config.endpoint.timeout_secs, 10);
        assert_eq!(config.ambient_fallback, AmbientReading::new(25.0, 50.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = NodeConfig::from_json_str(
            r#"{"device_id":"kitchen","network":{"ssid":"lab","max_polls":3}}"#,
        )
        .unwrap();
        assert_eq!(config.device_id, "kitchen");
        assert_eq!(config.network.credentials.ssid, "lab");
        assert_eq!(config.network.max_polls, 3);
        assert_eq!(config.network.poll_interval_ms, 1000);
        assert_eq!(config.calibration, CalibrationSet::default());
    }

    #[test]
    fn environment_overrides_file() {
        let mut config = NodeConfig::from_json_str(r#"{"sampling_period_secs":10}"#).unwrap();
        config
            .apply_env_from(env(&[
                (ENV_SAMPLING_PERIOD, "15"),
                (ENV_WIFI_SSID, "office"),
                (ENV_WIFI_PASSWORD, "secret"),
                (ENV_RETRY_INTERVAL, " 120 "),
                (ENV_ENDPOINT, "https://ingest.local/data"),
            ]))
            .unwrap();

        assert_eq!(config.sampling_period_secs, 15);
        assert_eq!(config.network.credentials.password, "secret");
        assert_eq!(config.network.retry_interval_secs, 120);
        assert_eq!(config.endpoint.url, "https://ingest.local/data");
        assert_eq!(config.http_config().endpoint, "https://ingest.local/data");
    }

    #[test]
    fn bad_env_value_names_variable() {
        let mut config = NodeConfig::default();
        let err = config
            .apply_env_from(env(&[(ENV_RETRY_INTERVAL, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_RETRY_INTERVAL));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = NodeConfig::default();
        config.sampling_period_secs = 0;
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.endpoint.url = "192.168.99.14:5000/data".into();
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.device_id = "  ".into();
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.network.max_polls = 0;
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.calibration.co2.baseline_resistance = 0.0;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("calibration.co2"));
    }

    #[test]
    fn timeout_must_fit_in_period() {
        let mut config = NodeConfig::default();
        config.sampling_period_secs = 10;
        config.endpoint.timeout_secs = 10;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("endpoint.timeout_secs"));

        config.endpoint.timeout_secs = 9;
        config.network.max_polls = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn association_budget_must_fit_in_period() {
        // 25 one-second polls plus a 10 s timeout overrun a 30 s cycle
        let mut config = NodeConfig::default();
        config.network.max_polls = 25;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("association"));

        // exactly filling the period is allowed
        config.network.max_polls = 20;
        assert!(config.validate().is_ok());
    }
}
