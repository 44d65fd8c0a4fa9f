//! Telemetry payload and encoder
//!
//! The encoder only rounds for display. Scoring has already run on full
//! precision values by the time a payload is built, so nothing here feeds back
//! into the measurement path.

use airwatch_core::time::{epoch_seconds, Timestamp};
use airwatch_core::{AirQualityLabel, Concentrations, ScoreBreakdown, SensorSample};
use serde::{Deserialize, Serialize};

use crate::SchemaError;

/// Measurement units on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "ppm")]
    Ppm,
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "%")]
    Percent,
}

impl Unit {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Unit::Ppm => "ppm",
            Unit::Celsius => "C",
            Unit::Percent => "%",
        }
    }
}

/// A value with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement<T> {
    pub value: T,
    pub unit: Unit,
}

/// The four readings of a cycle, rounded for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReadings {
    /// CO in ppm, 2 decimals
    pub co: Measurement<f64>,
    /// CO2 in ppm, whole number
    pub co2: Measurement<u64>,
    /// Air temperature in °C, 1 decimal
    pub temperature: Measurement<f64>,
    /// Relative humidity in %, 1 decimal
    pub humidity: Measurement<f64>,
}

/// Displayed score and label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    pub score: u8,
    pub description: AirQualityLabel,
}

/// One telemetry document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryPayload {
    /// Epoch seconds
    pub timestamp: u64,
    pub device_id: String,
    pub sensors: SensorReadings,
    pub air_quality: AirQuality,
}

impl TelemetryPayload {
    /// Serialize to the JSON body sent to the sink
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, SchemaError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, SchemaError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parse a stored document
    pub fn from_json(data: &[u8]) -> Result<Self, SchemaError> {
        serde_json::from_slice(data).map_err(|e| SchemaError::Parse(e.to_string()))
    }
}

/// Round to a fixed number of decimals for display
pub fn round_to(value: f32, decimals: i32) -> f64 {
    let scale = libm::pow(10.0, decimals as f64);
    libm::round(value as f64 * scale) / scale
}

/// Round a ppm value to a whole number, ties to even
///
/// Wide enough for every finite `f32` reached by the power law; a saturated
/// MQ-135 near full scale is well past `u32::MAX`.
pub fn round_ppm(value: f32) -> u64 {
    // `as` saturates: negatives and NaN become 0
    libm::rint(value as f64) as u64
}

/// Builds payloads for one device
#[derive(Debug, Clone)]
pub struct TelemetryEncoder {
    device_id: String,
}

impl TelemetryEncoder {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self { device_id: device_id.into() }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Assemble the payload of one cycle. `timestamp` is in milliseconds.
    pub fn encode(
        &self,
        timestamp: Timestamp,
        sample: &SensorSample,
        concentrations: &Concentrations,
        score: &ScoreBreakdown,
    ) -> TelemetryPayload {
        TelemetryPayload {
            timestamp: epoch_seconds(timestamp),
            device_id: self.device_id.clone(),
            sensors: SensorReadings {
                co: Measurement {
                    value: round_to(concentrations.co.ppm(), 2),
                    unit: Unit::Ppm,
                },
                co2: Measurement {
                    value: round_ppm(concentrations.co2.ppm()),
                    unit: Unit::Ppm,
                },
                temperature: Measurement {
                    value: round_to(sample.temperature_c(), 1),
                    unit: Unit::Celsius,
                },
                humidity: Measurement {
                    value: round_to(sample.humidity_pct(), 1),
                    unit: Unit::Percent,
                },
            },
            air_quality: AirQuality {
                score: score.score,
                description: score.label,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airwatch_core::model::ConcentrationEstimate;
    use airwatch_core::{model, scoring, AmbientReading, CalibrationSet};

    fn encode_fixture() -> TelemetryPayload {
        let sample = SensorSample::new(700, 1400, AmbientReading::new(22.46, 47.94));
        let concentrations = Concentrations {
            co: ConcentrationEstimate::from_ppm(3.4567),
            co2: ConcentrationEstimate::from_ppm(612.5),
        };
        let breakdown = scoring::score_sample(&sample, &concentrations);
        TelemetryEncoder::new("node-7").encode(1_718_000_000_750, &sample, &concentrations, &breakdown)
    }

    #[test]
    fn rounds_display_values() {
        let payload = encode_fixture();
        assert_eq!(payload.timestamp, 1_718_000_000);
        assert_eq!(payload.device_id, "node-7");
        assert_eq!(payload.sensors.co.value, 3.46);
        assert_eq!(payload.sensors.co2.value, 612);
        assert_eq!(payload.sensors.temperature.value, 22.5);
        assert_eq!(payload.sensors.humidity.value, 47.9);
    }

    #[test]
    fn score_is_not_recomputed_from_rounded_values() {
        let sample = SensorSample::new(0, 0, AmbientReading::new(24.04, 50.0));
        let concentrations = Concentrations::default();
        let mut breakdown = scoring::score_sample(&sample, &concentrations);
        breakdown.score = 42;
        breakdown.label = AirQualityLabel::Mediocre;

        let payload = TelemetryEncoder::new("x").encode(0, &sample, &concentrations, &breakdown);
        assert_eq!(payload.air_quality.score, 42);
        assert_eq!(payload.air_quality.description, AirQualityLabel::Mediocre);
    }

    #[test]
    fn serializes_wire_names() {
        let json = encode_fixture().to_value().unwrap();
        assert_eq!(json["sensors"]["co"]["unit"], "ppm");
        assert_eq!(json["sensors"]["co2"]["value"], 612);
        assert_eq!(json["sensors"]["temperature"]["unit"], "C");
        assert_eq!(json["sensors"]["humidity"]["unit"], "%");
        assert!(json["air_quality"]["description"].is_string());
        assert!(json.get("schema_version").is_none());
    }

    #[test]
    fn stored_document_parses_back() {
        let body = br#"{
            "timestamp": 1718000000,
            "device_id": "esp32_air_monitor_1",
            "sensors": {
                "co": {"value": 1.5, "unit": "ppm"},
                "co2": {"value": 455, "unit": "ppm"},
                "temperature": {"value": 21.0, "unit": "C"},
                "humidity": {"value": 44.2, "unit": "%"}
            },
            "air_quality": {"score": 97, "description": "EXCELLENTE"}
        }"#;

        let payload = TelemetryPayload::from_json(body).unwrap();
        assert_eq!(payload.air_quality.description, AirQualityLabel::Excellent);
        assert_eq!(payload.sensors.co2.value, 455);
    }

    #[test]
    fn ppm_rounding_saturates() {
        assert_eq!(round_ppm(612.5), 612);
        assert_eq!(round_ppm(613.5), 614);
        assert_eq!(round_ppm(-4.0), 0);
        assert_eq!(round_ppm(f32::NAN), 0);
    }

    #[test]
    fn co2_keeps_full_magnitude() {
        // one count below full scale, default MQ-135 fit
        let sample = SensorSample::new(700, 4094, AmbientReading::new(20.0, 65.0));
        let concentrations = model::estimate_sample(&sample, &CalibrationSet::default());
        let breakdown = scoring::score_sample(&sample, &concentrations);
        let payload = TelemetryEncoder::new("x").encode(0, &sample, &concentrations, &breakdown);

        let co2 = payload.sensors.co2.value;
        assert!(co2 > u64::from(u32::MAX), "co2 = {}", co2);
        assert_eq!(co2, libm::rint(concentrations.co2.ppm() as f64) as u64);

        let json = payload.to_value().unwrap();
        assert_eq!(json["sensors"]["co2"]["value"].as_u64(), Some(co2));
    }
}
