//! Piecewise-linear component scores
//!
//! Each channel maps to [0, 100] independently. The ramps intentionally do not
//! meet the zero breakpoints exactly (the hot-side temperature ramp reaches
//! -0.2 at 30°C), so every component is clamped on the way out.

use crate::constants::scoring::*;

fn clamp_score(score: f32) -> f32 {
    if score.is_nan() {
        return SCORE_MIN;
    }
    score.clamp(SCORE_MIN, SCORE_MAX)
}

/// CO component: loses 2 points per ppm, zero from 50 ppm
pub fn co_score(ppm: f32) -> f32 {
    if ppm >= CO_ZERO_SCORE_PPM {
        return SCORE_MIN;
    }
    clamp_score(SCORE_MAX - ppm * CO_POINTS_PER_PPM)
}

/// CO2 component: perfect up to 400 ppm, zero from 2500 ppm
pub fn co2_score(ppm: f32) -> f32 {
    if ppm <= CO2_CLEAN_PPM {
        SCORE_MAX
    } else if ppm >= CO2_ZERO_SCORE_PPM {
        SCORE_MIN
    } else {
        clamp_score(SCORE_MAX - (ppm - CO2_CLEAN_PPM) / CO2_PPM_PER_POINT)
    }
}

/// Temperature component: perfect in [20, 24]°C, zero outside [15, 30]°C
pub fn temperature_score(temperature_c: f32) -> f32 {
    if (TEMP_COMFORT_MIN_C..=TEMP_COMFORT_MAX_C).contains(&temperature_c) {
        SCORE_MAX
    } else if temperature_c < TEMP_LIMIT_MIN_C || temperature_c > TEMP_LIMIT_MAX_C {
        SCORE_MIN
    } else if temperature_c < TEMP_COMFORT_MIN_C {
        clamp_score(SCORE_MAX - (TEMP_COMFORT_MIN_C - temperature_c) * TEMP_COLD_POINTS_PER_C)
    } else {
        clamp_score(SCORE_MAX - (temperature_c - TEMP_COMFORT_MAX_C) * TEMP_HOT_POINTS_PER_C)
    }
}

/// Humidity component: perfect in [40, 60]%, zero outside [20, 80]%
pub fn humidity_score(humidity_pct: f32) -> f32 {
    if (HUMIDITY_COMFORT_MIN_PCT..=HUMIDITY_COMFORT_MAX_PCT).contains(&humidity_pct) {
        SCORE_MAX
    } else if humidity_pct < HUMIDITY_LIMIT_MIN_PCT || humidity_pct > HUMIDITY_LIMIT_MAX_PCT {
        SCORE_MIN
    } else if humidity_pct < HUMIDITY_COMFORT_MIN_PCT {
        clamp_score(SCORE_MAX - (HUMIDITY_COMFORT_MIN_PCT - humidity_pct) * HUMIDITY_POINTS_PER_PCT)
    } else {
        clamp_score(SCORE_MAX - (humidity_pct - HUMIDITY_COMFORT_MAX_PCT) * HUMIDITY_POINTS_PER_PCT)
    }
}
