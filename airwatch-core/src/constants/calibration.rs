//! Gas Sensor Calibration Constants
//!
//! Power-law fits `ppm = A * (Rs/R0)^B` taken from the log-log sensitivity
//! curves in the Hanwei datasheets, with R0 measured in clean air on the
//! deployed units.

// ===== MQ-9 (carbon monoxide channel) =====

/// MQ-9 load resistance (kΩ).
///
/// Source: breakout board RL, measured
pub const MQ9_LOAD_RESISTANCE_KOHM: f32 = 10.0;

/// MQ-9 resistance in clean air (kΩ).
///
/// Source: field calibration after 48 h burn-in
pub const MQ9_BASELINE_RESISTANCE_KOHM: f32 = 9.8;

/// MQ-9 CO curve coefficient A.
pub const MQ9_CO_A: f32 = 599.65;

/// MQ-9 CO curve exponent B.
pub const MQ9_CO_B: f32 = -2.128;

// ===== MQ-135 (carbon dioxide channel) =====

/// MQ-135 load resistance (kΩ).
pub const MQ135_LOAD_RESISTANCE_KOHM: f32 = 10.0;

/// MQ-135 resistance in clean air (kΩ).
///
/// Source: field calibration after 48 h burn-in
pub const MQ135_BASELINE_RESISTANCE_KOHM: f32 = 76.63;

/// MQ-135 CO2 curve coefficient A.
pub const MQ135_CO2_A: f32 = 110.47;

/// MQ-135 CO2 curve exponent B.
pub const MQ135_CO2_B: f32 = -2.862;
