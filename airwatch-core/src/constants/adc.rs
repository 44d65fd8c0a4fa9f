//! Analog Front-End Characteristics
//!
//! The MQ-series heaters and load resistors sit on the 3.3 V rail and feed the
//! ESP32 ADC1 channels configured with 11 dB attenuation.

/// Highest count a 12-bit conversion can return.
///
/// Source: ESP32 technical reference, ADC1 at 12-bit width
pub const ADC_FULL_SCALE: u16 = 4095;

/// Supply reference the divider is referenced to (V).
///
/// With 11 dB attenuation the input span is approximately the full 3.3 V rail.
pub const ADC_REFERENCE_V: f32 = 3.3;
