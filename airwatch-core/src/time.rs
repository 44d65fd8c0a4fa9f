//! Time management for edge devices
//!
//! Provides clock abstraction for the acquisition loop:
//! - System clock (when available)
//! - Manual clock (for tests and simulation)
//! - Blocking delays, bounded by the caller

/// Timestamp in milliseconds since epoch (or device boot for monotonic)
pub type Timestamp = u64;

/// Source of time for the system
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Check if this source provides wall clock time (vs monotonic)
    fn is_wall_clock(&self) -> bool;
}

/// Blocking wait used between association polls and between cycles
pub trait Delay {
    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

/// Epoch seconds for the payload timestamp
pub fn epoch_seconds(timestamp: Timestamp) -> u64 {
    timestamp / 1000
}

/// Milliseconds elapsed from `earlier` to `later`, zero if the clock went backwards
pub fn elapsed_ms(earlier: Timestamp, later: Timestamp) -> u64 {
    later.saturating_sub(earlier)
}

/// System time source (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl TimeSource for SystemClock {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }

    fn is_wall_clock(&self) -> bool {
        true
    }
}

#[cfg(feature = "std")]
impl Delay for SystemClock {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(ms as u64));
    }
}

/// Fixed time source for testing
///
/// Delays advance the clock instead of blocking, so a test can drive hours of
/// cycles instantly.
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
    slept_ms: u64,
}

impl FixedTime {
    /// Clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp, slept_ms: 0 }
    }

    /// Jump to `timestamp`; not counted as sleep
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move forward by `ms`; not counted as sleep
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }

    /// Total time spent in [`Delay::delay_ms`]
    pub fn slept_ms(&self) -> u64 {
        self.slept_ms
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}

impl Delay for FixedTime {
    fn delay_ms(&mut self, ms: u32) {
        self.timestamp += ms as u64;
        self.slept_ms += ms as u64;
    }
}
