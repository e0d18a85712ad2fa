//! garp - Gratuitous ARP announcer.
//!
//! Resolves the requested interface against both the OS and the capture
//! library enumerations, opens a send handle on it, and broadcasts the
//! announced binding once or on a fixed interval until interrupted.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use garp::announcer::{Announcer, Schedule};
use garp::config::Config;
use garp::network::{Inventory, PcapSender, SystemInventory};

/// Broadcast Gratuitous ARP replies announcing an IPv4-to-MAC binding.
#[derive(Debug, Parser)]
#[command(name = "garp", version, about, long_about = None)]
struct Cli {
    /// IPv4 address to announce.
    #[arg(long)]
    ip: Option<String>,

    /// MAC address the IP should resolve to.
    #[arg(long)]
    mac: Option<String>,

    /// Interface: OS name, capture device name, or capture description.
    #[arg(short, long, visible_alias = "interface")]
    iface: Option<String>,

    /// Repeat interval (e.g. "30s", "1m"). Omitted or 0 sends once.
    #[arg(long, value_parser = humantime::parse_duration)]
    interval: Option<Duration>,

    /// List interfaces present in both enumerations and exit.
    #[arg(short, long)]
    list: bool,

    /// Optional TOML configuration file. Flags override its values.
    #[arg(short, long, env = "GARP_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn overrides(&self) -> Config {
        Config {
            interface: self.iface.clone(),
            ip: self.ip.clone(),
            mac: self.mac.clone(),
            interval: self.interval,
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print every OS interface / capture device pair sharing an IPv4 address.
fn list_interfaces() -> Result<()> {
    let inventory =
        Inventory::collect(&SystemInventory).context("Failed to enumerate interfaces")?;
    let pairs = inventory.pairs();

    if pairs.is_empty() {
        println!("No interface is visible to both the OS and the capture library.");
        return Ok(());
    }

    println!("Available interfaces:");
    for pair in pairs {
        let state = if pair.os.is_up { "up" } else { "down" };
        let mac = pair
            .os
            .mac
            .map_or_else(|| "-".to_owned(), |mac| mac.to_string());
        let addresses = pair
            .shared_addresses()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {pair}");
        println!("      state: {state}, mac: {mac}, addresses: {addresses}");
    }
    Ok(())
}

/// Cancel `shutdown` on SIGINT or SIGTERM.
///
/// Signal handlers are registered before returning so a signal arriving
/// right after startup is not lost.
#[cfg(unix)]
fn spawn_signal_listener(shutdown: CancellationToken) -> Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt =
        signal(SignalKind::interrupt()).context("Failed to register SIGINT handler")?;
    let mut terminate =
        signal(SignalKind::terminate()).context("Failed to register SIGTERM handler")?;

    tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => info!("SIGINT received"),
            _ = terminate.recv() => info!("SIGTERM received"),
        }
        shutdown.cancel();
    });
    Ok(())
}

#[cfg(not(unix))]
fn spawn_signal_listener(shutdown: CancellationToken) -> Result<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Ctrl-C received"),
            Err(err) => warn!("Failed to listen for Ctrl-C: {err}"),
        }
        shutdown.cancel();
    });
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let file_config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    if cli.list {
        return list_interfaces();
    }

    let (settings, paired) = file_config
        .merge(cli.overrides())
        .prepare(&SystemInventory)
        .context("Failed to prepare announcement")?;

    if !paired.os.is_up {
        warn!(interface = %paired.os.name, "interface is down, frames may not leave the host");
    }
    info!(
        interface = %paired,
        binding = %settings.binding,
        "resolved interface"
    );

    let sender = PcapSender::open(paired.device_name()).context("Failed to open send handle")?;
    debug!(device = sender.device(), "send handle ready");
    let announcer = Announcer::new(sender, settings.binding)?;

    let shutdown = CancellationToken::new();
    if let Schedule::Every(period) = settings.schedule {
        info!(?period, "press Ctrl-C to stop");
        spawn_signal_listener(shutdown.clone())?;
    }

    let summary = announcer
        .run(settings.schedule, shutdown)
        .await
        .context("Failed to send gratuitous ARP")?;

    info!(
        attempts = summary.attempts,
        failures = summary.failures,
        "done"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    run(cli).await
}
