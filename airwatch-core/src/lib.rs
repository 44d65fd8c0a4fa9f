//! Core measurement engine for AirWatch
//!
//! Turns raw MQ-series gas sensor counts plus ambient temperature/humidity
//! into calibrated concentrations and a composite air-quality score.
//! Designed to run on the sensor node itself.
//!
//! Key constraints:
//! - Runs on an ESP32 next to the Wi-Fi stack
//! - No heap allocation in the measurement path
//! - Never fails: degenerate inputs are clamped, not propagated
//!
//! ```no_run
//! use airwatch_core::{model, scoring, AmbientReading, CalibrationSet, SensorSample};
//!
//! let calibration = CalibrationSet::default();
//! let sample = SensorSample::new(812, 1650, AmbientReading::new(21.0, 48.0));
//!
//! let concentrations = model::estimate_sample(&sample, &calibration);
//! let breakdown = scoring::score_sample(&sample, &concentrations);
//! println!("{} / 100 - {}", breakdown.score, breakdown.label);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

pub mod constants;
pub mod errors;
pub mod model;
pub mod sample;
pub mod scoring;
pub mod time;
pub mod traits;

// Public API
pub use errors::{SensorError, SensorResult};
pub use model::{CalibrationParams, CalibrationSet, ConcentrationEstimate, Concentrations};
pub use sample::{AmbientOrigin, AmbientReading, GasChannel, SensorSample};
pub use scoring::{AirQualityLabel, ScoreBreakdown};
pub use time::{Delay, TimeSource, Timestamp};
pub use traits::{AmbientSensor, GasSensorArray};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
