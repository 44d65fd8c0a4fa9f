//! Connectivity State Machine
//!
//! The node has one network link (a WiFi station on the device, a TCP reachability
//! check on a host). [`ConnectivityManager`] owns its state:
//!
//! ```text
//!                connect()              associated
//!  Disconnected ───────────► Connecting ───────────► Connected
//!       ▲                        │                       │
//!       │      polls exhausted   │     live check fails  │
//!       └────────────────────────┴───────────────────────┘
//! ```
//!
//! A new attempt is allowed only when the previous one is older than the
//! retry interval. The association wait is the only blocking step of a cycle
//! and is bounded by `max_polls` waits of `poll_interval_ms`.

use airwatch_core::constants::{
    DEFAULT_ASSOCIATION_POLLS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_RETRY_INTERVAL_MS,
    MS_PER_SECOND,
};
use airwatch_core::time::{elapsed_ms, Delay, TimeSource, Timestamp};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Network credentials handed to the link driver
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub ssid: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("ssid", &self.ssid)
            .field("password", &"***")
            .finish()
    }
}

/// A network link driver
pub trait Link {
    /// Driver error, only ever logged
    type Error: fmt::Display;

    /// Live link status
    fn is_associated(&mut self) -> bool;

    /// Start associating; completion is observed through [`Link::is_associated`]
    fn begin_association(&mut self, credentials: &Credentials) -> Result<(), Self::Error>;
}

impl<T: Link + ?Sized> Link for &mut T {
    type Error = T::Error;

    fn is_associated(&mut self) -> bool {
        (**self).is_associated()
    }

    fn begin_association(&mut self, credentials: &Credentials) -> Result<(), Self::Error> {
        (**self).begin_association(credentials)
    }
}

/// Link settings, fixed at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    #[serde(flatten)]
    pub credentials: Credentials,
    /// Minimum time between two association attempts
    pub retry_interval_secs: u64,
    /// Wait between two status polls while associating
    pub poll_interval_ms: u32,
    /// Number of waits before an attempt is abandoned
    pub max_polls: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            retry_interval_secs: DEFAULT_RETRY_INTERVAL_MS / MS_PER_SECOND,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_polls: DEFAULT_ASSOCIATION_POLLS,
        }
    }
}

impl LinkConfig {
    pub fn retry_interval_ms(&self) -> u64 {
        self.retry_interval_secs.saturating_mul(MS_PER_SECOND)
    }
}

/// Link state as seen by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityState {
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectivityState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConnectivityState::Disconnected => "disconnected",
            ConnectivityState::Connecting => "connecting",
            ConnectivityState::Connected => "connected",
        }
    }
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a connect request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// Machine was not Disconnected; nothing done
    NotNeeded,
    /// Retry cooldown still running; nothing done
    CoolingDown,
    /// Link was up before association was started
    AlreadyAssociated,
    /// Link came up after this many waits
    Associated { polls: u32 },
    /// Driver refused to start association
    Rejected,
    /// All waits used without the link coming up
    TimedOut,
}

impl ConnectOutcome {
    /// Whether an attempt was actually made
    pub fn attempted(&self) -> bool {
        !matches!(self, ConnectOutcome::NotNeeded | ConnectOutcome::CoolingDown)
    }
}

/// Link counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LinkStats {
    /// Association attempts started
    pub attempts: u32,
    /// Attempts that ended Connected
    pub successes: u32,
    /// Attempts that ended Disconnected
    pub failures: u32,
    /// Connected to Disconnected on a live check
    pub drops: u32,
    /// Disconnected to Connected on a live check
    pub recoveries: u32,
}

/// Owner of the connectivity state
#[derive(Debug, Clone)]
pub struct ConnectivityManager {
    config: LinkConfig,
    state: ConnectivityState,
    last_attempt: Option<Timestamp>,
    stats: LinkStats,
}

impl ConnectivityManager {
    pub fn new(config: LinkConfig) -> Self {
        Self {
            config,
            state: ConnectivityState::Disconnected,
            last_attempt: None,
            stats: LinkStats::default(),
        }
    }

    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectivityState::Connected
    }

    pub fn last_attempt(&self) -> Option<Timestamp> {
        self.last_attempt
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// True when no attempt was made yet or the last one is strictly older
    /// than the retry interval
    pub fn cooldown_elapsed(&self, now: Timestamp) -> bool {
        match self.last_attempt {
            None => true,
            Some(at) => elapsed_ms(at, now) > self.config.retry_interval_ms(),
        }
    }

    /// Milliseconds until the next attempt is allowed, while Disconnected
    pub fn remaining_cooldown(&self, now: Timestamp) -> Option<u64> {
        if self.state != ConnectivityState::Disconnected {
            return None;
        }
        Some(match self.last_attempt {
            None => 0,
            Some(at) => {
                // strict comparison: allowed one millisecond after the interval
                (self.config.retry_interval_ms() + 1).saturating_sub(elapsed_ms(at, now))
            }
        })
    }

    /// Whether a connect request would start an attempt now
    pub fn should_attempt(&self, now: Timestamp) -> bool {
        self.state == ConnectivityState::Disconnected && self.cooldown_elapsed(now)
    }

    /// Connect if Disconnected and the cooldown allows it.
    ///
    /// Blocks for at most `max_polls * poll_interval_ms` through `clock`.
    pub fn connect<L, C>(&mut self, link: &mut L, clock: &mut C) -> ConnectOutcome
    where
        L: Link,
        C: TimeSource + Delay,
    {
        if self.state != ConnectivityState::Disconnected {
            return ConnectOutcome::NotNeeded;
        }
        let now = clock.now();
        if !self.cooldown_elapsed(now) {
            return ConnectOutcome::CoolingDown;
        }

        self.last_attempt = Some(now);
        self.stats.attempts += 1;

        if link.is_associated() {
            info!("Link already associated");
            return self.finish(ConnectOutcome::AlreadyAssociated);
        }

        self.state = ConnectivityState::Connecting;
        info!("Associating with '{}'", self.config.credentials.ssid);

        if let Err(e) = link.begin_association(&self.config.credentials) {
            warn!("Association rejected by driver: {}", e);
            return self.finish(ConnectOutcome::Rejected);
        }

        let mut polls = 0;
        loop {
            if link.is_associated() {
                return self.finish(ConnectOutcome::Associated { polls });
            }
            if polls >= self.config.max_polls {
                break;
            }
            clock.delay_ms(self.config.poll_interval_ms);
            polls += 1;
            debug!("Waiting for link ({}/{})", polls, self.config.max_polls);
        }

        warn!(
            "Link did not come up after {} ms, next attempt in {} s",
            u64::from(polls) * u64::from(self.config.poll_interval_ms),
            self.config.retry_interval_secs
        );
        self.finish(ConnectOutcome::TimedOut)
    }

    /// Live check. Moves Connected to Disconnected when the link is gone and
    /// Disconnected to Connected when it came back on its own.
    pub fn refresh<L: Link>(&mut self, link: &mut L) -> ConnectivityState {
        let up = link.is_associated();
        match (self.state, up) {
            (ConnectivityState::Connected, false) => {
                warn!("Link lost");
                self.stats.drops += 1;
                self.state = ConnectivityState::Disconnected;
            }
            (ConnectivityState::Disconnected, true) => {
                info!("Link re-associated");
                self.stats.recoveries += 1;
                self.state = ConnectivityState::Connected;
            }
            _ => {}
        }
        self.state
    }

    fn finish(&mut self, outcome: ConnectOutcome) -> ConnectOutcome {
        match outcome {
            ConnectOutcome::AlreadyAssociated | ConnectOutcome::Associated { .. } => {
                self.state = ConnectivityState::Connected;
                self.stats.successes += 1;
            }
            _ => {
                self.state = ConnectivityState::Disconnected;
                self.stats.failures += 1;
            }
        }
        outcome
    }
}
