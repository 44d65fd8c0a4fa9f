//! Host drivers
//!
//! Stand-ins for the device peripherals so the loop can run on a workstation:
//! drifting gas counts, a plausible room climate and a link that is "up"
//! when the ingestion endpoint accepts TCP connections.

use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use airwatch_connectors::{Credentials, Link};
use airwatch_core::constants::ADC_FULL_SCALE;
use airwatch_core::{AmbientReading, AmbientSensor, GasChannel, GasSensorArray, SensorError, SensorResult};

/// Small linear congruential generator, enough for plausible jitter
#[derive(Debug, Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) as u32
    }

    /// Uniform in [-1, 1]
    fn unit(&mut self) -> f32 {
        (self.next_u32() as f32 / (u32::MAX >> 1) as f32) * 2.0 - 1.0
    }
}

/// Gas array whose counts random-walk around a baseline
#[derive(Debug, Clone)]
pub struct SimulatedGasArray {
    rng: Lcg,
    co: f32,
    co2: f32,
}

impl SimulatedGasArray {
    /// Clean-air baselines: a few ppm CO, roughly outdoor CO2
    pub const CO_BASELINE: u16 = 700;
    pub const CO2_BASELINE: u16 = 1700;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: Lcg(seed),
            co: Self::CO_BASELINE as f32,
            co2: Self::CO2_BASELINE as f32,
        }
    }
}

impl GasSensorArray for SimulatedGasArray {
    fn read_raw(&mut self, channel: GasChannel) -> u16 {
        let (value, baseline) = match channel {
            GasChannel::Co => (&mut self.co, Self::CO_BASELINE as f32),
            GasChannel::Co2 => (&mut self.co2, Self::CO2_BASELINE as f32),
        };
        // drift with a pull back towards the baseline
        *value += self.rng.unit() * 40.0 + (baseline - *value) * 0.1;
        *value = value.clamp(0.0, ADC_FULL_SCALE as f32);
        *value as u16
    }
}

/// Room climate with occasional read failures
#[derive(Debug, Clone)]
pub struct SimulatedAmbient {
    rng: Lcg,
    reads: u32,
    fail_every: Option<u32>,
}

impl SimulatedAmbient {
    pub fn new(seed: u64) -> Self {
        Self { rng: Lcg(seed ^ 0x5DEE_CE66), reads: 0, fail_every: None }
    }

    /// Fail every `n`th read with a timeout, like a flaky single-wire sensor
    pub fn fail_every(mut self, n: u32) -> Self {
        self.fail_every = (n > 0).then_some(n);
        self
    }
}

impl AmbientSensor for SimulatedAmbient {
    fn measure(&mut self) -> SensorResult<AmbientReading> {
        self.reads += 1;
        if self.fail_every.is_some_and(|n| self.reads % n == 0) {
            return Err(SensorError::Timeout);
        }
        Ok(AmbientReading::new(
            22.0 + self.rng.unit() * 1.5,
            48.0 + self.rng.unit() * 6.0,
        ))
    }
}

/// Link that is up while the endpoint accepts TCP connections.
///
/// Association is the host's business, so starting it only re-resolves the
/// endpoint address.
#[derive(Debug, Clone)]
pub struct HostLink {
    authority: String,
    addr: Option<SocketAddr>,
    reach_timeout: Duration,
}

impl HostLink {
    pub fn from_endpoint(url: &str) -> io::Result<Self> {
        let authority = authority_of(url).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("no host in {:?}", url))
        })?;
        Ok(Self {
            authority,
            addr: None,
            reach_timeout: Duration::from_millis(500),
        })
    }

    fn resolve(&mut self) -> io::Result<SocketAddr> {
        let addr = self
            .authority
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "endpoint did not resolve"))?;
        self.addr = Some(addr);
        Ok(addr)
    }
}

impl Link for HostLink {
    type Error = io::Error;

    fn is_associated(&mut self) -> bool {
        let addr = match self.addr {
            Some(addr) => addr,
            None => match self.resolve() {
                Ok(addr) => addr,
                Err(_) => return false,
            },
        };
        TcpStream::connect_timeout(&addr, self.reach_timeout).is_ok()
    }

    fn begin_association(&mut self, _credentials: &Credentials) -> Result<(), Self::Error> {
        self.resolve().map(|_| ())
    }
}

/// `host:port` of an http(s) URL, with the scheme's default port
fn authority_of(url: &str) -> Option<String> {
    let (rest, default_port) = if let Some(rest) = url.strip_prefix("http://") {
        (rest, 80)
    } else if let Some(rest) = url.strip_prefix("https://") {
        (rest, 443)
    } else {
        return None;
    };

    let host = rest.split(['/', '?', '#']).next()?;
    if host.is_empty() {
        return None;
    }
    if host.rsplit_once(':').is_some_and(|(_, port)| port.parse::<u16>().is_ok()) {
        Some(host.to_string())
    } else {
        Some(format!("{}:{}", host, default_port))
    }
}
