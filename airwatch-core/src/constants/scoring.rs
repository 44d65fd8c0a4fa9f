//! Air Quality Scoring Tables
//!
//! Breakpoints for the four component scores and their weights in the
//! composite. Gases dominate (80%) because comfort parameters alone never make
//! air unsafe.

// ===== COMPONENT WEIGHTS =====

/// Weight of the CO component in the composite.
pub const CO_WEIGHT: f32 = 0.4;

/// Weight of the CO2 component in the composite.
pub const CO2_WEIGHT: f32 = 0.4;

/// Weight of the temperature component in the composite.
pub const TEMPERATURE_WEIGHT: f32 = 0.1;

/// Weight of the humidity component in the composite.
pub const HUMIDITY_WEIGHT: f32 = 0.1;

/// Best possible component or composite score.
pub const SCORE_MAX: f32 = 100.0;

/// Worst possible component or composite score.
pub const SCORE_MIN: f32 = 0.0;

// ===== CARBON MONOXIDE =====

/// CO concentration at which the component reaches zero (ppm).
///
/// Source: 8 h exposure ceiling used by most residential CO alarms
pub const CO_ZERO_SCORE_PPM: f32 = 50.0;

/// Score points lost per ppm of CO.
pub const CO_POINTS_PER_PPM: f32 = 2.0;

// ===== CARBON DIOXIDE =====

/// CO2 level scored as perfect, roughly outdoor background (ppm).
pub const CO2_CLEAN_PPM: f32 = 400.0;

/// CO2 level at which the component reaches zero (ppm).
pub const CO2_ZERO_SCORE_PPM: f32 = 2500.0;

/// ppm of CO2 per score point lost between the two breakpoints.
pub const CO2_PPM_PER_POINT: f32 = 21.0;

// ===== TEMPERATURE =====

/// Comfort band lower edge (°C).
pub const TEMP_COMFORT_MIN_C: f32 = 20.0;

/// Comfort band upper edge (°C).
pub const TEMP_COMFORT_MAX_C: f32 = 24.0;

/// Below this the temperature component is zero (°C).
pub const TEMP_LIMIT_MIN_C: f32 = 15.0;

/// Above this the temperature component is zero (°C).
pub const TEMP_LIMIT_MAX_C: f32 = 30.0;

/// Points lost per °C below the comfort band.
pub const TEMP_COLD_POINTS_PER_C: f32 = 20.0;

/// Points lost per °C above the comfort band.
pub const TEMP_HOT_POINTS_PER_C: f32 = 16.7;

// ===== HUMIDITY =====

/// Comfort band lower edge (%RH).
pub const HUMIDITY_COMFORT_MIN_PCT: f32 = 40.0;

/// Comfort band upper edge (%RH).
pub const HUMIDITY_COMFORT_MAX_PCT: f32 = 60.0;

/// Below this the humidity component is zero (%RH).
pub const HUMIDITY_LIMIT_MIN_PCT: f32 = 20.0;

/// Above this the humidity component is zero (%RH).
pub const HUMIDITY_LIMIT_MAX_PCT: f32 = 80.0;

/// Points lost per %RH outside the comfort band.
pub const HUMIDITY_POINTS_PER_PCT: f32 = 5.0;
