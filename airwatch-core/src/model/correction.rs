//! Linear temperature/humidity correction
//!
//! MQ sensitivity curves are published for 20°C / 65% RH. These factors are
//! first-order linear scalings around those points; they are kept for parity
//! with deployed units and have not been verified against chamber data.

use crate::constants::environment::{
    HUMIDITY_CORRECTION_CENTER_PCT, HUMIDITY_CORRECTION_PER_PCT, TEMP_CORRECTION_CENTER_C,
    TEMP_CORRECTION_PER_C,
};

/// Multiplicative temperature factor, 1.0 at 20°C
pub fn temperature_factor(temperature_c: f32) -> f32 {
    if temperature_c < TEMP_CORRECTION_CENTER_C {
        1.0 - (TEMP_CORRECTION_CENTER_C - temperature_c) * TEMP_CORRECTION_PER_C
    } else {
        1.0 + (temperature_c - TEMP_CORRECTION_CENTER_C) * TEMP_CORRECTION_PER_C
    }
}

/// Humidity divisor, 1.0 at 65% RH
pub fn humidity_factor(humidity_pct: f32) -> f32 {
    1.0 + (humidity_pct - HUMIDITY_CORRECTION_CENTER_PCT) * HUMIDITY_CORRECTION_PER_PCT
}

/// Apply both corrections to an uncorrected ppm value.
///
/// Returns `None` when the humidity divisor is not strictly positive.
pub fn apply(ppm: f32, temperature_c: f32, humidity_pct: f32) -> Option<f32> {
    let hum = humidity_factor(humidity_pct);
    if !(hum > 0.0) {
        return None;
    }
    Some(ppm * temperature_factor(temperature_c) / hum)
}
