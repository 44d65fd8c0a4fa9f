//! Air Quality Scoring Engine
//!
//! ## Overview
//!
//! Four independent component scores are combined into a single 0-100 index:
//!
//! ```text
//! composite = 0.4 * CO + 0.4 * CO2 + 0.1 * temperature + 0.1 * humidity
//! ```
//!
//! Gases carry 80% of the weight: an uncomfortable room is not a dangerous
//! one, but a CO leak must drag the index down even at perfect comfort.
//!
//! The composite keeps full precision; the displayed score is the composite
//! rounded to the nearest integer, ties to even, and the label is looked up
//! from the displayed score.
//!
//! ## Usage Example
//!
//! ```rust
//! use airwatch_core::scoring::{score, AirQualityLabel};
//!
//! let breakdown = score(2.0, 600.0, 22.0, 50.0);
//! assert_eq!(breakdown.score, 95);
//! assert_eq!(breakdown.label, AirQualityLabel::Excellent);
//! ```

mod components;
mod label;

pub use components::{co2_score, co_score, humidity_score, temperature_score};
pub use label::AirQualityLabel;

use crate::constants::scoring::{
    CO2_WEIGHT, CO_WEIGHT, HUMIDITY_WEIGHT, SCORE_MAX, SCORE_MIN, TEMPERATURE_WEIGHT,
};
use crate::model::Concentrations;
use crate::sample::SensorSample;

/// Component scores, composite and label of one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBreakdown {
    /// CO component in [0, 100]
    pub co: f32,
    /// CO2 component in [0, 100]
    pub co2: f32,
    /// Temperature component in [0, 100]
    pub temperature: f32,
    /// Humidity component in [0, 100]
    pub humidity: f32,
    /// Weighted composite in [0, 100], unrounded
    pub composite: f32,
    /// Composite rounded for display
    pub score: u8,
    /// Label for `score`
    pub label: AirQualityLabel,
}

/// Weighted sum of component scores, clamped to [0, 100]
pub fn composite(co: f32, co2: f32, temperature: f32, humidity: f32) -> f32 {
    let total = co * CO_WEIGHT
        + co2 * CO2_WEIGHT
        + temperature * TEMPERATURE_WEIGHT
        + humidity * HUMIDITY_WEIGHT;
    if total.is_nan() {
        return SCORE_MIN;
    }
    total.clamp(SCORE_MIN, SCORE_MAX)
}

/// Round a composite for display, ties to even
pub fn display_score(composite: f32) -> u8 {
    libm::rintf(composite).clamp(SCORE_MIN, SCORE_MAX) as u8
}

/// Score a set of readings
pub fn score(co_ppm: f32, co2_ppm: f32, temperature_c: f32, humidity_pct: f32) -> ScoreBreakdown {
    let co = co_score(co_ppm);
    let co2 = co2_score(co2_ppm);
    let temperature = temperature_score(temperature_c);
    let humidity = humidity_score(humidity_pct);

    let composite = composite(co, co2, temperature, humidity);
    let score = display_score(composite);

    ScoreBreakdown {
        co,
        co2,
        temperature,
        humidity,
        composite,
        score,
        label: AirQualityLabel::from_score(score),
    }
}

/// Score a cycle from its sample and model output
pub fn score_sample(sample: &SensorSample, concentrations: &Concentrations) -> ScoreBreakdown {
    score(
        concentrations.co.ppm(),
        concentrations.co2.ppm(),
        sample.temperature_c(),
        sample.humidity_pct(),
    )
}
