//! Transfer-curve inversion for MQ-series gas sensors
//!
//! ## Signal Chain
//!
//! ```text
//!  3.3V ──[ Rs (sensor) ]──┬──[ RL (load) ]── GND
//!                          │
//!                        ADC pin  →  raw counts (0..=4095)
//! ```
//!
//! 1. `V = raw * Vref / 4095`
//! 2. `Rs = RL * (Vref - V) / V` (voltage divider solved for Rs)
//! 3. `ratio = Rs / R0`
//! 4. `ppm = A * ratio^B` (straight line on the datasheet's log-log plot)
//! 5. `ppm * temperature_factor / humidity_factor`
//!
//! ## Degenerate Inputs
//!
//! A zero voltage means an open or unplugged sensor; a non-positive ratio means
//! the reading is above the supply rail or the calibration drifted. Neither has
//! a meaningful power-law value, so both collapse to 0 ppm. The model never
//! returns an error.

use crate::constants::adc::{ADC_FULL_SCALE, ADC_REFERENCE_V};
use crate::model::calibration::CalibrationParams;
use crate::model::correction;

/// Estimated gas concentration in ppm, never negative
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConcentrationEstimate(f32);

impl ConcentrationEstimate {
    /// No gas detected, also the result of every degenerate input
    pub const ZERO: ConcentrationEstimate = ConcentrationEstimate(0.0);

    /// Wrap a ppm value, clamping negatives and non-finite values to zero
    pub fn from_ppm(ppm: f32) -> Self {
        if ppm.is_finite() && ppm > 0.0 {
            Self(ppm)
        } else {
            Self::ZERO
        }
    }

    /// Value in ppm
    pub fn ppm(self) -> f32 {
        self.0
    }

    /// Whether the estimate was clamped or measured as zero
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

/// Convert raw ADC counts to volts at the pin
pub fn adc_voltage(raw: u16) -> f32 {
    raw as f32 * ADC_REFERENCE_V / ADC_FULL_SCALE as f32
}

impl CalibrationParams {
    /// Sensor resistance Rs (kΩ) for a pin voltage
    pub fn sensor_resistance(&self, volts: f32) -> f32 {
        self.load_resistance * (ADC_REFERENCE_V - volts) / volts
    }

    /// Uncorrected power-law concentration at a resistance ratio
    pub fn ppm_at_ratio(&self, ratio: f32) -> f32 {
        self.a * libm::powf(ratio, self.b)
    }
}

/// Estimate the concentration seen by one sensor
pub fn estimate(
    raw: u16,
    calibration: &CalibrationParams,
    temperature_c: f32,
    humidity_pct: f32,
) -> ConcentrationEstimate {
    let volts = adc_voltage(raw);
    if volts == 0.0 {
        log_debug!("Zero voltage on gas channel, sensor open?");
        return ConcentrationEstimate::ZERO;
    }

    let rs = calibration.sensor_resistance(volts);
    let ratio = rs / calibration.baseline_resistance;
    if !(ratio > 0.0) {
        log_debug!("Degenerate resistance ratio {} (raw {})", ratio, raw);
        return ConcentrationEstimate::ZERO;
    }

    let ppm = calibration.ppm_at_ratio(ratio);
    match correction::apply(ppm, temperature_c, humidity_pct) {
        Some(corrected) => ConcentrationEstimate::from_ppm(corrected),
        None => ConcentrationEstimate::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_counts_is_zero_ppm() {
        let est = estimate(0, &CalibrationParams::MQ9_CO, 22.0, 50.0);
        assert!(est.is_zero());
    }

    #[test]
    fn above_rail_is_zero_ppm() {
        // Counts above full scale put V over Vref and Rs negative
        let est = estimate(u16::MAX, &CalibrationParams::MQ135_CO2, 22.0, 50.0);
        assert!(est.is_zero());
    }

    #[test]
    fn negative_baseline_is_zero_ppm() {
        let mut cal = CalibrationParams::MQ9_CO;
        cal.baseline_resistance = -9.8;
        assert!(estimate(1500, &cal, 22.0, 50.0).is_zero());
    }

    #[test]
    fn unit_ratio_reproduces_coefficient() {
        let mut cal = CalibrationParams::MQ9_CO;
        let raw = 2048;
        cal.baseline_resistance = cal.sensor_resistance(adc_voltage(raw));

        let est = estimate(raw, &cal, 20.0, 65.0);
        assert_eq!(est.ppm(), cal.a * libm::powf(1.0, cal.b));
        assert_eq!(est.ppm(), cal.a);
    }

    #[test]
    fn higher_voltage_means_more_gas() {
        // Lower Rs with more gas: ppm rises with counts on a negative-B curve
        let cal = CalibrationParams::MQ9_CO;
        let low = estimate(1000, &cal, 20.0, 65.0);
        let high = estimate(2000, &cal, 20.0, 65.0);
        assert!(high > low);
    }

    #[test]
    fn warm_dry_air_scales_up() {
        let cal = CalibrationParams::MQ135_CO2;
        let reference = estimate(1800, &cal, 20.0, 65.0).ppm();
        let warm = estimate(1800, &cal, 30.0, 65.0).ppm();
        let dry = estimate(1800, &cal, 20.0, 15.0).ppm();

        assert!((warm / reference - 1.1).abs() < 1e-4);
        assert!((dry / reference - 1.0 / 0.9).abs() < 1e-4);
    }

    #[test]
    fn from_ppm_clamps() {
        assert!(ConcentrationEstimate::from_ppm(-3.0).is_zero());
        assert!(ConcentrationEstimate::from_ppm(f32::INFINITY).is_zero());
        assert!(ConcentrationEstimate::from_ppm(f32::NAN).is_zero());
        assert_eq!(ConcentrationEstimate::from_ppm(12.5).ppm(), 12.5);
    }
}
