//! Per-channel calibration constants
//!
//! Fixed at startup and shared read-only across cycles. The set is `Copy` so
//! the orchestrator can hand it to the model without locking or borrowing
//! gymnastics.

use crate::constants::calibration::{
    MQ135_BASELINE_RESISTANCE_KOHM, MQ135_CO2_A, MQ135_CO2_B, MQ135_LOAD_RESISTANCE_KOHM,
    MQ9_BASELINE_RESISTANCE_KOHM, MQ9_CO_A, MQ9_CO_B, MQ9_LOAD_RESISTANCE_KOHM,
};
use crate::sample::GasChannel;

/// Transfer-curve parameters of one MQ-series sensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationParams {
    /// Load resistor RL in the voltage divider (kΩ)
    pub load_resistance: f32,
    /// Sensor resistance R0 in clean reference air (kΩ)
    pub baseline_resistance: f32,
    /// Power-law coefficient A in `ppm = A * ratio^B`
    pub a: f32,
    /// Power-law exponent B in `ppm = A * ratio^B`
    pub b: f32,
}

impl CalibrationParams {
    /// MQ-9 fitted for carbon monoxide
    pub const MQ9_CO: CalibrationParams = CalibrationParams {
        load_resistance: MQ9_LOAD_RESISTANCE_KOHM,
        baseline_resistance: MQ9_BASELINE_RESISTANCE_KOHM,
        a: MQ9_CO_A,
        b: MQ9_CO_B,
    };

    /// MQ-135 fitted for carbon dioxide
    pub const MQ135_CO2: CalibrationParams = CalibrationParams {
        load_resistance: MQ135_LOAD_RESISTANCE_KOHM,
        baseline_resistance: MQ135_BASELINE_RESISTANCE_KOHM,
        a: MQ135_CO2_A,
        b: MQ135_CO2_B,
    };

    /// Build a parameter set from its four constants
    pub const fn new(load_resistance: f32, baseline_resistance: f32, a: f32, b: f32) -> Self {
        Self { load_resistance, baseline_resistance, a, b }
    }

    /// Check the constants can produce a finite, non-negative curve.
    ///
    /// Returns the name of the first offending field.
    pub fn check(&self) -> Result<(), &'static str> {
        if !(self.load_resistance.is_finite() && self.load_resistance > 0.0) {
            return Err("load_resistance");
        }
        if !(self.baseline_resistance.is_finite() && self.baseline_resistance > 0.0) {
            return Err("baseline_resistance");
        }
        if !(self.a.is_finite() && self.a > 0.0) {
            return Err("a");
        }
        if !self.b.is_finite() {
            return Err("b");
        }
        Ok(())
    }
}

/// Calibration for both gas channels
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalibrationSet {
    /// MQ-9 carbon monoxide channel
    pub co: CalibrationParams,
    /// MQ-135 carbon dioxide channel
    pub co2: CalibrationParams,
}

impl Default for CalibrationSet {
    fn default() -> Self {
        Self {
            co: CalibrationParams::MQ9_CO,
            co2: CalibrationParams::MQ135_CO2,
        }
    }
}

impl CalibrationSet {
    /// Parameters of one gas channel
    pub fn for_channel(&self, channel: GasChannel) -> &CalibrationParams {
        match channel {
            GasChannel::Co => &self.co,
            GasChannel::Co2 => &self.co2,
        }
    }
}
