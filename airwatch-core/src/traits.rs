//! Core traits for sensor drivers
//!
//! The acquisition loop only needs numbers from hardware. Keep these simple -
//! a driver for a new board implements two small traits.

use crate::errors::SensorResult;
use crate::sample::{AmbientReading, GasChannel};

/// Analog front-end for the gas sensors
///
/// ADC conversions on the ESP32 cannot fail once the channel is configured,
/// so reads return counts directly.
pub trait GasSensorArray {
    /// Read raw counts for a channel, in `0..=ADC_FULL_SCALE`
    fn read_raw(&mut self, channel: GasChannel) -> u16;
}

/// Temperature/humidity sensor (DHT22, SHT4x, ...)
pub trait AmbientSensor {
    /// Trigger a measurement and return the result
    fn measure(&mut self) -> SensorResult<AmbientReading>;
}

impl<T: GasSensorArray + ?Sized> GasSensorArray for &mut T {
    fn read_raw(&mut self, channel: GasChannel) -> u16 {
        (**self).read_raw(channel)
    }
}

impl<T: AmbientSensor + ?Sized> AmbientSensor for &mut T {
    fn measure(&mut self) -> SensorResult<AmbientReading> {
        (**self).measure()
    }
}
