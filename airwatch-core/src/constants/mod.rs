//! Constants for AirWatch Core
//!
//! This module provides centralized, documented constants used throughout the
//! AirWatch measurement pipeline. All numeric values are defined here with
//! their source so the models and scoring tables never carry magic numbers.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **ADC**: Analog front-end characteristics
//! - **Calibration**: Factory curve fits for the MQ-series gas sensors
//! - **Environment**: Correction centers and ambient fallback values
//! - **Scoring**: Component breakpoints, weights and label thresholds
//! - **Time**: Sampling cadence and connectivity timing
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Reference the datasheet or field calibration a value comes from
//! 3. Use descriptive names that include units

/// Analog-to-digital converter characteristics.
pub mod adc;

/// Factory calibration constants for the gas sensors.
pub mod calibration;

/// Environmental correction centers and ambient defaults.
pub mod environment;

/// Scoring breakpoints, weights and label thresholds.
pub mod scoring;

/// Sampling cadence and connectivity timing.
pub mod time;

pub use adc::{ADC_FULL_SCALE, ADC_REFERENCE_V};

pub use environment::{
    FALLBACK_HUMIDITY_PCT, FALLBACK_TEMPERATURE_C,
    HUMIDITY_CORRECTION_CENTER_PCT, TEMP_CORRECTION_CENTER_C,
};

pub use scoring::{CO_WEIGHT, CO2_WEIGHT, HUMIDITY_WEIGHT, TEMPERATURE_WEIGHT};

pub use time::{
    DEFAULT_ASSOCIATION_POLLS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_RETRY_INTERVAL_MS, DEFAULT_SAMPLING_PERIOD_MS, MS_PER_SECOND,
};
