//! Gas Concentration Model
//!
//! Converts raw ADC counts from the MQ-series sensors into environmentally
//! corrected ppm estimates. See [`concentration`] for the signal chain.
//!
//! ## Usage Example
//!
//! ```rust
//! use airwatch_core::model::{self, CalibrationSet};
//! use airwatch_core::{AmbientReading, SensorSample};
//!
//! let calibration = CalibrationSet::default();
//! let sample = SensorSample::new(900, 1700, AmbientReading::new(22.0, 45.0));
//!
//! let readings = model::estimate_sample(&sample, &calibration);
//! assert!(readings.co.ppm() >= 0.0);
//! assert!(readings.co2.ppm() >= 0.0);
//! ```

mod calibration;
mod concentration;
mod correction;

pub use calibration::{CalibrationParams, CalibrationSet};
pub use concentration::{adc_voltage, estimate, ConcentrationEstimate};
pub use correction::{humidity_factor, temperature_factor};

use crate::sample::{GasChannel, SensorSample};

/// Estimates for both gas channels of one sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Concentrations {
    pub co: ConcentrationEstimate,
    pub co2: ConcentrationEstimate,
}

impl Concentrations {
    pub fn get(&self, channel: GasChannel) -> ConcentrationEstimate {
        match channel {
            GasChannel::Co => self.co,
            GasChannel::Co2 => self.co2,
        }
    }
}

/// Run the model on every gas channel of a sample, using its ambient pair
pub fn estimate_sample(sample: &SensorSample, calibration: &CalibrationSet) -> Concentrations {
    let at = |channel: GasChannel| {
        estimate(
            sample.raw(channel),
            calibration.for_channel(channel),
            sample.temperature_c(),
            sample.humidity_pct(),
        )
    };

    Concentrations {
        co: at(GasChannel::Co),
        co2: at(GasChannel::Co2),
    }
}
