//! Announcement scheduling.
//!
//! Sends the Gratuitous ARP frame once, or on a fixed interval until the
//! cancellation token fires. The runner owns the send handle; it is dropped
//! on every exit path.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use crate::address::AddressPair;
use crate::error::Result;
use crate::network::PacketSender;

/// Outcome of a periodic run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub attempts: u64,
    pub failures: u64,
}

/// How often to announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Once,
    Every(Duration),
}

impl Schedule {
    /// A missing or zero interval means a single send.
    pub fn from_interval(interval: Option<Duration>) -> Self {
        match interval {
            Some(period) if !period.is_zero() => Self::Every(period),
            _ => Self::Once,
        }
    }
}

/// Sends Gratuitous ARP frames for one binding through one handle.
pub struct Announcer<S: PacketSender> {
    sender: S,
    binding: AddressPair,
    frame: Vec<u8>,
}

impl<S: PacketSender> Announcer<S> {
    /// Create an announcer. The frame is built once up front.
    pub fn new(sender: S, binding: AddressPair) -> Result<Self> {
        let frame = binding.to_frame()?;
        Ok(Self {
            sender,
            binding,
            frame,
        })
    }

    pub const fn binding(&self) -> AddressPair {
        self.binding
    }

    /// Run according to `schedule`.
    pub async fn run(self, schedule: Schedule, shutdown: CancellationToken) -> Result<RunSummary> {
        match schedule {
            Schedule::Once => {
                self.announce_once()?;
                Ok(RunSummary {
                    attempts: 1,
                    failures: 0,
                })
            }
            Schedule::Every(period) => Ok(self.run_periodic(period, shutdown).await),
        }
    }

    /// Send a single frame. A send failure is returned to the caller.
    pub fn announce_once(mut self) -> Result<()> {
        self.sender.send(&self.frame)?;
        info!(binding = %self.binding, "sent gratuitous ARP");
        Ok(())
    }

    /// Send a frame on every tick until `shutdown` is cancelled.
    ///
    /// The first tick fires one `period` after start. Send failures are
    /// logged and the loop carries on with the next tick.
    #[instrument(skip(self, shutdown), fields(binding = %self.binding))]
    pub async fn run_periodic(mut self, period: Duration, shutdown: CancellationToken) -> RunSummary {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut summary = RunSummary::default();

        info!(?period, "announcing periodically, waiting for shutdown signal");

        loop {
            tokio::select! {
                biased;
                () = shutdown.cancelled() => {
                    info!(
                        attempts = summary.attempts,
                        failures = summary.failures,
                        "shutdown requested, stopping announcements"
                    );
                    break;
                }
                _ = ticker.tick() => {
                    summary.attempts += 1;
                    match self.sender.send(&self.frame) {
                        Ok(()) => info!(attempt = summary.attempts, "sent gratuitous ARP"),
                        Err(err) => {
                            summary.failures += 1;
                            error!(attempt = summary.attempts, "failed to send gratuitous ARP: {err}");
                        }
                    }
                }
            }
        }

        summary
    }
}
