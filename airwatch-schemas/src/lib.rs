//! Telemetry Schema for AirWatch Sensor Nodes
//!
//! ## Overview
//!
//! Every acquisition cycle produces one JSON document for the ingestion
//! service. The service stores documents verbatim and the dashboard reads them
//! back by field name, so the shape below is a contract:
//!
//! ```json
//! {
//!   "timestamp": 1718000000,
//!   "device_id": "esp32_air_monitor_1",
//!   "sensors": {
//!     "co":          { "value": 3.42, "unit": "ppm" },
//!     "co2":         { "value": 612,  "unit": "ppm" },
//!     "temperature": { "value": 22.4, "unit": "C" },
//!     "humidity":    { "value": 47.9, "unit": "%" }
//!   },
//!   "air_quality": { "score": 93, "description": "EXCELLENTE" }
//! }
//! ```
//!
//! ## Schema Evolution Strategy
//!
//! Stored documents outlive firmware. The rules:
//!
//! 1. **Never rename or retype a field**: old documents must stay readable
//! 2. **Version out of band**: the body carries no version field; the
//!    transport announces [`TELEMETRY_SCHEMA_VERSION`] instead
//! 3. **Display precision is part of the contract**: CO to 2 decimals, CO2 as
//!    an integer, temperature and humidity to 1 decimal
//!
//! ## Usage Example
//!
//! ```rust
//! use airwatch_core::{model, scoring, AmbientReading, CalibrationSet, SensorSample};
//! use airwatch_schemas::{TelemetryEncoder, WireValidator};
//!
//! let sample = SensorSample::new(900, 1700, AmbientReading::new(22.0, 45.0));
//! let concentrations = model::estimate_sample(&sample, &CalibrationSet::default());
//! let breakdown = scoring::score_sample(&sample, &concentrations);
//!
//! let encoder = TelemetryEncoder::new("esp32_air_monitor_1");
//! let payload = encoder.encode(1_718_000_000_000, &sample, &concentrations, &breakdown);
//!
//! let json = payload.to_value()?;
//! assert!(WireValidator::new().validate(&json).is_valid());
//! # Ok::<(), airwatch_schemas::SchemaError>(())
//! ```

pub mod telemetry;
pub mod validation;

pub use telemetry::{
    AirQuality, Measurement, SensorReadings, TelemetryEncoder, TelemetryPayload, Unit,
};
pub use validation::{IssueType, Severity, ValidationIssue, ValidationReport, WireValidator};

/// Version of the telemetry document layout
pub const TELEMETRY_SCHEMA_VERSION: u32 = 1;

/// Device identifier used when none is configured
pub const DEFAULT_DEVICE_ID: &str = "esp32_air_monitor_1";

/// Schema-related errors
#[derive(Debug, thiserror_no_std::Error)]
pub enum SchemaError {
    #[error("Failed to serialize payload: {0}")]
    Serialization(String),

    #[error("Failed to parse payload: {0}")]
    Parse(String),

    #[error("Payload does not match wire format: {0}")]
    Invalid(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Serialization(err.to_string())
    }
}
