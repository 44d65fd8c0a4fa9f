//! Error Types for Sensor Acquisition Faults
//!
//! ## Design Philosophy
//!
//! The measurement pipeline itself never fails: degenerate numeric inputs are
//! clamped by policy (see [`crate::model`]). The only fallible step in the core
//! is reading the ambient (temperature/humidity) sensor, and even that fault is
//! recovered locally by substituting a documented default pair.
//!
//! Errors are kept small and `Copy` so drivers can return them from interrupt
//! context or store the last fault without allocation:
//!
//! ```text
//! SensorError size = 8 bytes
//! ├── Discriminant: 1 byte
//! ├── Largest variant (Implausible): 4 bytes
//! └── Padding: 3 bytes
//! ```
//!
//! ## Error Categories
//!
//! - `Timeout`: the sensor did not answer within its bus timeout (DHT22 line
//!   never pulled low, I2C NACK)
//! - `Checksum`: a frame arrived but its checksum did not match
//! - `NotReady`: the sensor was polled faster than its minimum sampling period
//! - `Implausible`: a decoded value fell outside what the part can report
//!
//! ## Handling Strategy
//!
//! ```rust
//! use airwatch_core::{AmbientReading, SensorError};
//!
//! fn ambient_or_default(result: Result<AmbientReading, SensorError>) -> AmbientReading {
//!     match result {
//!         Ok(reading) => reading,
//!         // Transient fault: keep measuring with the fallback pair
//!         Err(_) => AmbientReading::FALLBACK,
//!     }
//! }
//! # assert_eq!(ambient_or_default(Err(SensorError::Timeout)), AmbientReading::FALLBACK);
//! ```

use thiserror_no_std::Error;

/// Result type for sensor reads
pub type SensorResult<T> = Result<T, SensorError>;

/// Ambient sensor faults - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SensorError {
    /// No response within the bus timeout
    #[error("Sensor did not respond")]
    Timeout,

    /// Frame received but checksum mismatch
    #[error("Checksum mismatch")]
    Checksum,

    /// Polled before the sensor finished its previous conversion
    #[error("Sensor not ready")]
    NotReady,

    /// Decoded value outside the sensor's reporting range
    #[error("Implausible reading {value}")]
    Implausible {
        /// The decoded value that was rejected
        value: f32,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Timeout => defmt::write!(fmt, "Sensor did not respond"),
            Self::Checksum => defmt::write!(fmt, "Checksum mismatch"),
            Self::NotReady => defmt::write!(fmt, "Sensor not ready"),
            Self::Implausible { value } => defmt::write!(fmt, "Implausible reading {}", value),
        }
    }
}
