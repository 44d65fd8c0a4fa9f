//! Environmental Correction and Ambient Defaults
//!
//! The MQ sensitivity curves are specified at 20°C / 65% RH. Readings taken in
//! other conditions are scaled linearly around those centers.

/// Temperature at which no correction is applied (°C).
///
/// Source: MQ-9 / MQ-135 datasheet test conditions
pub const TEMP_CORRECTION_CENTER_C: f32 = 20.0;

/// Fractional correction per °C away from the center.
pub const TEMP_CORRECTION_PER_C: f32 = 0.01;

/// Relative humidity at which no correction is applied (%).
///
/// Source: MQ-9 / MQ-135 datasheet test conditions
pub const HUMIDITY_CORRECTION_CENTER_PCT: f32 = 65.0;

/// Fractional correction per %RH away from the center.
pub const HUMIDITY_CORRECTION_PER_PCT: f32 = 0.002;

/// Temperature substituted when the ambient sensor read fails (°C).
pub const FALLBACK_TEMPERATURE_C: f32 = 25.0;

/// Humidity substituted when the ambient sensor read fails (%).
pub const FALLBACK_HUMIDITY_PCT: f32 = 50.0;
