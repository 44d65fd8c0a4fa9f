//! Network Side of an AirWatch Node
//!
//! ## Overview
//!
//! Two independent pieces live here:
//!
//! - [`link`]: the connectivity state machine. It owns the
//!   [`ConnectivityState`](link::ConnectivityState), decides when a new
//!   association attempt is allowed and runs the bounded poll loop while the
//!   radio associates.
//! - [`http`]: delivery of telemetry documents to the ingestion endpoint with
//!   one synchronous POST per cycle.
//!
//! The orchestrator composes them: it asks the link whether it is up and only
//! then hands the payload to a [`Connector`].
//!
//! ## Failure Model
//!
//! Nothing in this crate is fatal. A failed association leaves the machine
//! Disconnected until the retry cooldown has passed; a failed delivery drops
//! the payload and is counted in [`ConnectionStats`]. There is no buffering and
//! no retry within a cycle: the next cycle produces a fresher reading anyway.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use airwatch_connectors::http::{HttpConfig, HttpConnector};
//! use airwatch_connectors::Connector;
//!
//! let config = HttpConfig::new("http://192.168.99.14:5000/data").timeout_secs(10);
//! let mut http = HttpConnector::new(config)?;
//!
//! let status = http.send(br#"{"timestamp":1718000000}"#)?;
//! assert!((200..300).contains(&status));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod http;
pub mod link;

pub use http::{HttpConfig, HttpConnector, HttpError};
pub use link::{
    ConnectOutcome, ConnectivityManager, ConnectivityState, Credentials, Link, LinkConfig,
    LinkStats,
};

use thiserror::Error;

/// Common connector errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectorError {
    /// The sink could not be reached at all
    #[error("Transport error: {0}")]
    Transport(String),

    /// The sink answered with a non-2xx status
    #[error("Rejected with status {0}")]
    Status(u16),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Anything that can deliver an encoded telemetry document
pub trait Connector {
    /// Deliver one document. Returns the sink's status code on success.
    fn send(&mut self, data: &[u8]) -> Result<u16, ConnectorError>;

    /// Get delivery statistics
    fn stats(&self) -> ConnectionStats;
}

impl<T: Connector + ?Sized> Connector for &mut T {
    fn send(&mut self, data: &[u8]) -> Result<u16, ConnectorError> {
        (**self).send(data)
    }

    fn stats(&self) -> ConnectionStats {
        (**self).stats()
    }
}

/// Delivery statistics common to all connectors
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConnectionStats {
    /// Total messages accepted by the sink
    pub messages_sent: u64,
    /// Total messages dropped after a failed delivery
    pub messages_failed: u64,
    /// Total body bytes accepted by the sink
    pub bytes_sent: u64,
    /// Status code of the last answered request
    pub last_status: Option<u16>,
    /// Last error message
    pub last_error: Option<String>,
}

impl ConnectionStats {
    /// Record a delivery the sink accepted
    pub fn record_success(&mut self, status: u16, bytes: usize) {
        self.messages_sent += 1;
        self.bytes_sent += bytes as u64;
        self.last_status = Some(status);
    }

    /// Record a dropped delivery
    pub fn record_failure(&mut self, error: &ConnectorError) {
        self.messages_failed += 1;
        if let ConnectorError::Status(status) = error {
            self.last_status = Some(*status);
        }
        self.last_error = Some(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_track_outcomes() {
        let mut stats = ConnectionStats::default();
        stats.record_success(201, 240);
        stats.record_failure(&ConnectorError::Status(503));
        stats.record_failure(&ConnectorError::Transport("connection refused".into()));

        assert_eq!(stats.messages_sent, 1);
        assert_eq!(stats.messages_failed, 2);
        assert_eq!(stats.bytes_sent, 240);
        assert_eq!(stats.last_status, Some(503));
        assert_eq!(
            stats.last_error.as_deref(),
            Some("Transport error: connection refused")
        );
    }
}
