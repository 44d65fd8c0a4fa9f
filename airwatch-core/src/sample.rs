//! Per-cycle measurement records
//!
//! A [`SensorSample`] is captured once per acquisition cycle and never
//! modified afterwards; the model and scoring stages only borrow it.

use crate::constants::{FALLBACK_HUMIDITY_PCT, FALLBACK_TEMPERATURE_C};

/// Gas channels wired to the ADC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GasChannel {
    /// Carbon monoxide (MQ-9)
    Co,
    /// Carbon dioxide (MQ-135)
    Co2,
}

impl GasChannel {
    /// Both channels in acquisition order
    pub const ALL: [GasChannel; 2] = [GasChannel::Co, GasChannel::Co2];
}

/// Temperature and relative humidity from the ambient sensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmbientReading {
    /// Air temperature in °C
    pub temperature_c: f32,
    /// Relative humidity in %
    pub humidity_pct: f32,
}

impl AmbientReading {
    /// Pair substituted when the ambient sensor cannot be read
    pub const FALLBACK: AmbientReading = AmbientReading {
        temperature_c: FALLBACK_TEMPERATURE_C,
        humidity_pct: FALLBACK_HUMIDITY_PCT,
    };

    /// Pair in °C and % relative humidity
    pub const fn new(temperature_c: f32, humidity_pct: f32) -> Self {
        Self { temperature_c, humidity_pct }
    }
}

impl Default for AmbientReading {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Where the ambient pair of a sample came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbientOrigin {
    /// Read from the sensor this cycle
    Measured,
    /// Sensor read failed, fallback pair used
    Fallback,
}

/// Raw readings of one acquisition cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    co_raw: u16,
    co2_raw: u16,
    ambient: AmbientReading,
    origin: AmbientOrigin,
}

impl SensorSample {
    /// Sample with a successfully measured ambient pair
    pub fn new(co_raw: u16, co2_raw: u16, ambient: AmbientReading) -> Self {
        Self { co_raw, co2_raw, ambient, origin: AmbientOrigin::Measured }
    }

    /// Sample whose ambient read failed, carrying the substituted pair
    /// (normally [`AmbientReading::FALLBACK`])
    pub fn with_fallback_ambient(co_raw: u16, co2_raw: u16, fallback: AmbientReading) -> Self {
        Self {
            co_raw,
            co2_raw,
            ambient: fallback,
            origin: AmbientOrigin::Fallback,
        }
    }

    /// Raw ADC counts for a gas channel
    pub fn raw(&self, channel: GasChannel) -> u16 {
        match channel {
            GasChannel::Co => self.co_raw,
            GasChannel::Co2 => self.co2_raw,
        }
    }

    /// Air temperature used for correction, measured or fallback
    pub fn temperature_c(&self) -> f32 {
        self.ambient.temperature_c
    }

    /// Relative humidity used for correction, measured or fallback
    pub fn humidity_pct(&self) -> f32 {
        self.ambient.humidity_pct
    }

    /// Whether the ambient pair was measured this cycle
    pub fn ambient_origin(&self) -> AmbientOrigin {
        self.origin
    }
}
