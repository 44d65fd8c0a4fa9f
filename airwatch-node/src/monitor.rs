//! Acquisition and dispatch loop
//!
//! One [`Monitor`] drives the whole node on a single thread. A cycle:
//!
//! 1. ask the connectivity manager for an association attempt (it decides
//!    whether the link is down and the retry cooldown has passed)
//! 2. read both gas channels and the ambient sensor, substituting the
//!    fallback pair when the ambient read fails
//! 3. estimate concentrations and score them at full precision
//! 4. build the telemetry document
//! 5. re-check the live link and, if it is up, POST the document once
//!
//! Faults never leave the cycle: they are logged, recorded in the
//! [`CycleReport`] and the next cycle starts on schedule.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use airwatch_connectors::{
    ConnectOutcome, ConnectionStats, ConnectivityManager, ConnectivityState, Connector,
    ConnectorError, Link, LinkStats,
};
use airwatch_core::time::{elapsed_ms, Delay, TimeSource, Timestamp};
use airwatch_core::{
    model, scoring, AmbientOrigin, AmbientReading, AmbientSensor, CalibrationSet, Concentrations,
    GasChannel, GasSensorArray, ScoreBreakdown, SensorSample,
};
use airwatch_schemas::{TelemetryEncoder, TelemetryPayload};
use log::{debug, info, warn};

use crate::config::NodeConfig;

/// Longest single wait between two stop checks
pub const STOP_POLL_MS: u32 = 250;

/// Cooperative stop flag shared with whoever may end the loop
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop; the loop exits before its next cycle
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What happened to a cycle's document
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Sink accepted it with this status
    Delivered { status: u16 },
    /// Delivery attempted and failed; the document is dropped
    Failed(ConnectorError),
    /// Link down, nothing sent
    Skipped,
}

/// Everything one cycle produced
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// 1-based cycle number
    pub cycle: u64,
    pub timestamp: Timestamp,
    pub sample: SensorSample,
    pub concentrations: Concentrations,
    pub score: ScoreBreakdown,
    pub payload: TelemetryPayload,
    /// Result of step 1
    pub connect: ConnectOutcome,
    /// Link state after the live check
    pub link: ConnectivityState,
    /// Time until the next association attempt is allowed, when offline
    pub next_attempt_ms: Option<u64>,
    pub dispatch: DispatchOutcome,
}

/// Totals over a run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub cycles: u64,
    pub delivered: u64,
    pub failed: u64,
    pub skipped: u64,
    pub link: LinkStats,
    pub dispatch: ConnectionStats,
}

impl RunSummary {
    fn record(&mut self, report: &CycleReport) {
        self.cycles += 1;
        match report.dispatch {
            DispatchOutcome::Delivered { .. } => self.delivered += 1,
            DispatchOutcome::Failed(_) => self.failed += 1,
            DispatchOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// The node's control loop
pub struct Monitor<G, A, L, C, K> {
    gas: G,
    ambient: A,
    link: L,
    connector: C,
    clock: K,
    connectivity: ConnectivityManager,
    encoder: TelemetryEncoder,
    calibration: CalibrationSet,
    ambient_fallback: AmbientReading,
    period_ms: u64,
    cycles: u64,
}

impl<G, A, L, C, K> Monitor<G, A, L, C, K>
where
    G: GasSensorArray,
    A: AmbientSensor,
    L: Link,
    C: Connector,
    K: TimeSource + Delay,
{
    pub fn new(config: &NodeConfig, gas: G, ambient: A, link: L, connector: C, clock: K) -> Self {
        Self {
            gas,
            ambient,
            link,
            connector,
            clock,
            connectivity: ConnectivityManager::new(config.network.clone()),
            encoder: TelemetryEncoder::new(config.device_id.clone()),
            calibration: config.calibration,
            ambient_fallback: config.ambient_fallback,
            period_ms: config.sampling_period_ms(),
            cycles: 0,
        }
    }

    pub fn connectivity(&self) -> &ConnectivityManager {
        &self.connectivity
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut K {
        &mut self.clock
    }

    /// Run one complete cycle
    pub fn run_cycle(&mut self) -> CycleReport {
        self.cycles += 1;

        let connect = self.connectivity.connect(&mut self.link, &mut self.clock);
        let timestamp = self.clock.now();

        let sample = self.capture();
        let concentrations = model::estimate_sample(&sample, &self.calibration);
        let score = scoring::score_sample(&sample, &concentrations);
        let payload = self.encoder.encode(timestamp, &sample, &concentrations, &score);

        let link = self.connectivity.refresh(&mut self.link);
        let dispatch = if link == ConnectivityState::Connected {
            self.dispatch(&payload)
        } else {
            DispatchOutcome::Skipped
        };

        let report = CycleReport {
            cycle: self.cycles,
            timestamp,
            sample,
            concentrations,
            score,
            payload,
            connect,
            link,
            next_attempt_ms: self.connectivity.remaining_cooldown(self.clock.now()),
            dispatch,
        };
        log_report(&report);
        report
    }

    /// Run cycles until `stop` is raised or `max_cycles` have run
    pub fn run(&mut self, stop: &StopHandle, max_cycles: Option<u64>) -> RunSummary {
        let mut summary = RunSummary::default();

        while !stop.is_stopped() {
            if max_cycles.is_some_and(|max| summary.cycles >= max) {
                break;
            }

            let started = self.clock.now();
            let report = self.run_cycle();
            summary.record(&report);

            if max_cycles.is_some_and(|max| summary.cycles >= max) {
                break;
            }
            self.wait_next_cycle(started, stop);
        }

        if stop.is_stopped() {
            info!("Stop requested, leaving after {} cycles", summary.cycles);
        }
        summary.link = self.connectivity.stats();
        summary.dispatch = self.connector.stats();
        summary
    }

    fn capture(&mut self) -> SensorSample {
        let co_raw = self.gas.read_raw(GasChannel::Co);
        let co2_raw = self.gas.read_raw(GasChannel::Co2);

        match self.ambient.measure() {
            Ok(reading) => SensorSample::new(co_raw, co2_raw, reading),
            Err(e) => {
                warn!(
                    "Ambient sensor read failed ({}), using {:.1} C / {:.1} %",
                    e, self.ambient_fallback.temperature_c, self.ambient_fallback.humidity_pct
                );
                SensorSample::with_fallback_ambient(co_raw, co2_raw, self.ambient_fallback)
            }
        }
    }

    fn dispatch(&mut self, payload: &TelemetryPayload) -> DispatchOutcome {
        let body = match payload.to_json_bytes() {
            Ok(body) => body,
            Err(e) => {
                warn!("Payload not encodable: {}", e);
                return DispatchOutcome::Failed(ConnectorError::Transport(e.to_string()));
            }
        };
        debug!("Payload: {}", String::from_utf8_lossy(&body));

        match self.connector.send(&body) {
            Ok(status) => DispatchOutcome::Delivered { status },
            Err(e) => DispatchOutcome::Failed(e),
        }
    }

    /// Sleep out the rest of the period in slices, returning early on stop
    fn wait_next_cycle(&mut self, started: Timestamp, stop: &StopHandle) {
        let mut remaining = self
            .period_ms
            .saturating_sub(elapsed_ms(started, self.clock.now()));

        while remaining > 0 && !stop.is_stopped() {
            let slice = remaining.min(u64::from(STOP_POLL_MS));
            self.clock.delay_ms(slice as u32);
            remaining -= slice;
        }
    }
}

fn log_report(report: &CycleReport) {
    let score = &report.score;
    let conc = &report.concentrations;

    info!(
        "Cycle {}: air quality {}/100 - {} (link {})",
        report.cycle, score.score, score.label, report.link
    );
    debug!(
        "Raw counts: co={} co2={}",
        report.sample.raw(GasChannel::Co),
        report.sample.raw(GasChannel::Co2)
    );
    debug!("  CO: {:.2} ppm (score {:.0}/100)", conc.co.ppm(), score.co);
    debug!("  CO2: {:.0} ppm (score {:.0}/100)", conc.co2.ppm(), score.co2);
    debug!(
        "  Temperature: {:.1} C (score {:.0}/100){}",
        report.sample.temperature_c(),
        score.temperature,
        fallback_marker(report.sample.ambient_origin())
    );
    debug!(
        "  Humidity: {:.1} % (score {:.0}/100)",
        report.sample.humidity_pct(),
        score.humidity
    );

    match &report.dispatch {
        DispatchOutcome::Delivered { status } => info!("Sent, sink answered {}", status),
        DispatchOutcome::Failed(e) => warn!("Send failed, reading dropped: {}", e),
        DispatchOutcome::Skipped => match report.next_attempt_ms {
            Some(ms) => info!(
                "Not sent (link down), next association attempt in {} s",
                ms.div_ceil(1000)
            ),
            None => info!("Not sent (link down)"),
        },
    }
}

fn fallback_marker(origin: AmbientOrigin) -> &'static str {
    match origin {
        AmbientOrigin::Measured => "",
        AmbientOrigin::Fallback => " [fallback]",
    }
}
