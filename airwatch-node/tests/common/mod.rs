//! Mock peripherals for loop integration tests
//!
//! - Gas array with fixed counts
//! - Ambient sensor replaying scripted results
//! - Link toggled directly by the test
//! - Connector replaying scripted responses and keeping every body
//! - Clock that raises a stop after sleeping for a while, like a signal
//!   arriving between cycles

#![allow(dead_code)]

use std::collections::VecDeque;

use airwatch_connectors::{ConnectionStats, Connector, ConnectorError, Credentials, Link};
use airwatch_core::time::{Delay, FixedTime, TimeSource, Timestamp};
use airwatch_core::{
    AmbientReading, AmbientSensor, GasChannel, GasSensorArray, SensorResult,
};
use airwatch_node::{Monitor, NodeConfig, StopHandle};

pub type TestMonitor = Monitor<FixedGas, ScriptedAmbient, MockLink, MockConnector, FixedTime>;

/// Gas array returning the same counts every cycle
pub struct FixedGas {
    pub co: u16,
    pub co2: u16,
}

impl GasSensorArray for FixedGas {
    fn read_raw(&mut self, channel: GasChannel) -> u16 {
        match channel {
            GasChannel::Co => self.co,
            GasChannel::Co2 => self.co2,
        }
    }
}

/// Replays queued results, then keeps answering `steady`
pub struct ScriptedAmbient {
    pub queued: VecDeque<SensorResult<AmbientReading>>,
    pub steady: AmbientReading,
}

impl ScriptedAmbient {
    pub fn steady(reading: AmbientReading) -> Self {
        Self { queued: VecDeque::new(), steady: reading }
    }

    pub fn then(mut self, result: SensorResult<AmbientReading>) -> Self {
        self.queued.push_back(result);
        self
    }
}

impl AmbientSensor for ScriptedAmbient {
    fn measure(&mut self) -> SensorResult<AmbientReading> {
        self.queued.pop_front().unwrap_or(Ok(self.steady))
    }
}

/// Link whose status the test sets
#[derive(Default)]
pub struct MockLink {
    pub up: bool,
    /// Come up as soon as association starts
    pub joins_on_begin: bool,
    pub begins: u32,
}

impl MockLink {
    pub fn up() -> Self {
        Self { up: true, ..Self::default() }
    }

    pub fn down() -> Self {
        Self::default()
    }
}

impl Link for MockLink {
    type Error = &'static str;

    fn is_associated(&mut self) -> bool {
        self.up
    }

    fn begin_association(&mut self, _credentials: &Credentials) -> Result<(), Self::Error> {
        self.begins += 1;
        if self.joins_on_begin {
            self.up = true;
        }
        Ok(())
    }
}

/// Connector replaying scripted responses (default 201)
#[derive(Default)]
pub struct MockConnector {
    pub responses: VecDeque<Result<u16, ConnectorError>>,
    pub bodies: Vec<Vec<u8>>,
    pub stats: ConnectionStats,
    /// Raise this handle once a body has been sent
    pub stop_on_send: Option<StopHandle>,
}

impl MockConnector {
    pub fn answering(responses: Vec<Result<u16, ConnectorError>>) -> Self {
        Self { responses: responses.into(), ..Self::default() }
    }
}

impl Connector for MockConnector {
    fn send(&mut self, data: &[u8]) -> Result<u16, ConnectorError> {
        self.bodies.push(data.to_vec());
        if let Some(stop) = &self.stop_on_send {
            stop.stop();
        }
        let result = self.responses.pop_front().unwrap_or(Ok(201));
        match &result {
            Ok(status) => self.stats.record_success(*status, data.len()),
            Err(e) => self.stats.record_failure(e),
        }
        result
    }

    fn stats(&self) -> ConnectionStats {
        self.stats.clone()
    }
}

/// Test clock that raises `stop` once it has slept `after_ms` in total
pub struct StoppingClock {
    pub inner: FixedTime,
    pub stop: StopHandle,
    pub after_ms: u64,
}

impl TimeSource for StoppingClock {
    fn now(&self) -> Timestamp {
        self.inner.now()
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}

impl Delay for StoppingClock {
    fn delay_ms(&mut self, ms: u32) {
        self.inner.delay_ms(ms);
        if self.inner.slept_ms() >= self.after_ms {
            self.stop.stop();
        }
    }
}

/// Clean indoor air at 22 °C / 45 %
pub fn room() -> AmbientReading {
    AmbientReading::new(22.0, 45.0)
}

pub fn monitor(config: &NodeConfig, link: MockLink, connector: MockConnector) -> TestMonitor {
    monitor_with_ambient(config, ScriptedAmbient::steady(room()), link, connector)
}

pub fn monitor_with_ambient(
    config: &NodeConfig,
    ambient: ScriptedAmbient,
    link: MockLink,
    connector: MockConnector,
) -> TestMonitor {
    Monitor::new(
        config,
        FixedGas { co: 700, co2: 1700 },
        ambient,
        link,
        connector,
        FixedTime::new(0),
    )
}
