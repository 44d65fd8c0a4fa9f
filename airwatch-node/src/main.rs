use std::path::PathBuf;

use airwatch_connectors::HttpConnector;
use airwatch_core::time::{SystemClock, TimeSource};
use airwatch_node::sim::{HostLink, SimulatedAmbient, SimulatedGasArray};
use airwatch_node::{Monitor, NodeConfig, StopHandle};
use anyhow::Context;
use clap::Parser;
use log::{info, LevelFilter};

#[derive(Parser)]
#[command(author, version, about = "Air quality node with simulated sensors", long_about = None)]
struct Args {
    /// JSON configuration file; AIRWATCH_* variables override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many cycles
    #[arg(long)]
    cycles: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let mut logger = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => logger.parse_filters(&filters),
        Err(_) => logger.filter_level(LevelFilter::Info),
    };
    logger.init();

    let args = Args::parse();
    let config = NodeConfig::load(args.config.as_deref()).context("loading configuration")?;

    let link = HostLink::from_endpoint(&config.endpoint.url).context("endpoint address")?;
    let http = HttpConnector::new(config.http_config()).context("HTTP connector")?;
    let seed = SystemClock.now();

    info!(
        "Node {} sampling every {} s, sending to {}",
        config.device_id, config.sampling_period_secs, config.endpoint.url
    );
    info!("Runs without network; readings taken while offline are not sent");

    let mut monitor = Monitor::new(
        &config,
        SimulatedGasArray::new(seed),
        SimulatedAmbient::new(seed),
        link,
        http,
        SystemClock,
    );

    let stop = StopHandle::new();
    let handle = stop.clone();
    ctrlc::set_handler(move || handle.stop()).context("installing stop handler")?;

    let summary = monitor.run(&stop, args.cycles);
    if stop.is_stopped() {
        info!("Stopped by operator");
    }

    info!(
        "Stopped after {} cycles: {} delivered, {} failed, {} skipped ({} association attempts, {} link drops)",
        summary.cycles,
        summary.delivered,
        summary.failed,
        summary.skipped,
        summary.link.attempts,
        summary.link.drops
    );
    Ok(())
}
