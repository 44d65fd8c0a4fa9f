//! Configuration files on disk

use std::io::Write;

use airwatch_node::{ConfigError, NodeConfig};
use tempfile::NamedTempFile;

fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn loads_full_file() {
    let file = write_config(
        r#"{
            "device_id": "greenhouse_2",
            "sampling_period_secs": 60,
            "network": {
                "ssid": "greenhouse",
                "password": "tomatoes",
                "retry_interval_secs": 120,
                "poll_interval_ms": 500,
                "max_polls": 20
            },
            "endpoint": { "url": "http://10.0.0.5:5000/data", "timeout_secs": 5 },
            "calibration": {
                "co":  { "load_resistance": 10.0, "baseline_resistance": 11.2, "a": 599.65, "b": -2.128 },
                "co2": { "load_resistance": 20.0, "baseline_resistance": 80.0, "a": 110.47, "b": -2.862 }
            },
            "ambient_fallback": { "temperature_c": 18.0, "humidity_pct": 70.0 }
        }"#,
    );

    let config = NodeConfig::from_json_file(file.path()).unwrap();
    config.validate().unwrap();

    assert_eq!(config.device_id, "greenhouse_2");
    assert_eq!(config.sampling_period_ms(), 60_000);
    assert_eq!(config.network.credentials.password, "tomatoes");
    assert_eq!(config.network.retry_interval_ms(), 120_000);
    assert_eq!(config.network.max_polls, 20);
    assert_eq!(config.endpoint.timeout_secs, 5);
    assert_eq!(config.calibration.co.baseline_resistance, 11.2);
    assert_eq!(config.calibration.co2.load_resistance, 20.0);
    assert_eq!(config.ambient_fallback.temperature_c, 18.0);
}

#[test]
fn empty_object_is_all_defaults() {
    let file = write_config("{}");
    let config = NodeConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config, NodeConfig::default());
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = NodeConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let file = write_config(r#"{"sampling_period_secs": "thirty"}"#);
    let err = NodeConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn invalid_values_rejected_after_loading() {
    let file = write_config(r#"{"endpoint": {"url": "ftp://10.0.0.5/data"}}"#);
    let config = NodeConfig::from_json_file(file.path()).unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}
