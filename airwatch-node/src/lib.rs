//! AirWatch sensor node
//!
//! Wires the measurement engine, the telemetry schema and the network side
//! into the node's control loop.
//!
//! ```no_run
//! use airwatch_connectors::HttpConnector;
//! use airwatch_core::time::SystemClock;
//! use airwatch_node::sim::{HostLink, SimulatedAmbient, SimulatedGasArray};
//! use airwatch_node::{Monitor, NodeConfig, StopHandle};
//!
//! let config = NodeConfig::load(None)?;
//! let link = HostLink::from_endpoint(&config.endpoint.url)?;
//! let http = HttpConnector::new(config.http_config())?;
//!
//! let mut monitor = Monitor::new(
//!     &config,
//!     SimulatedGasArray::new(1),
//!     SimulatedAmbient::new(1),
//!     link,
//!     http,
//!     SystemClock,
//! );
//! let summary = monitor.run(&StopHandle::new(), Some(3));
//! println!("{} cycles, {} delivered", summary.cycles, summary.delivered);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod monitor;
pub mod sim;

pub use config::{ConfigError, EndpointConfig, NodeConfig};
pub use monitor::{CycleReport, DispatchOutcome, Monitor, RunSummary, StopHandle};
