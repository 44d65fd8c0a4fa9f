//! Time-Related Constants
//!
//! Sampling cadence and connectivity timing. All durations in milliseconds to
//! match [`crate::time::Timestamp`].

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Default interval between acquisition cycles (milliseconds).
///
/// MQ heaters respond over tens of seconds; sampling faster only adds noise.
pub const DEFAULT_SAMPLING_PERIOD_MS: u64 = 30 * MS_PER_SECOND;

/// Default minimum time between association attempts while offline (milliseconds).
///
/// Two sampling periods, so at most every other cycle pays the association cost.
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 60 * MS_PER_SECOND;

/// Default wait between link status polls during association (milliseconds).
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 1000;

/// Default number of link status polls before an attempt is abandoned.
///
/// Bounds the worst-case association block to about ten seconds.
pub const DEFAULT_ASSOCIATION_POLLS: u32 = 10;
