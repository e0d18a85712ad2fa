//! Raw frame transmission.
//!
//! Provides a trait-based abstraction over the send handle so the runner can
//! be tested without a real network device.

use pcap::{Active, Capture};
use tracing::debug;

use crate::error::{NetworkError, Result};

/// Snapshot length for the send handle. Nothing is captured with it.
const SNAPLEN: i32 = 65536;

/// Trait for packet sending implementations.
pub trait PacketSender: Send {
    /// Send a packet.
    fn send(&mut self, packet: &[u8]) -> Result<()>;
}

/// Production packet sender using a libpcap handle.
///
/// The handle is closed when the sender is dropped.
pub struct PcapSender {
    capture: Capture<Active>,
    device: String,
}

impl PcapSender {
    /// Open a send handle on the named capture device.
    pub fn open(device: &str) -> Result<Self> {
        let handle_error = |e: pcap::Error| NetworkError::HandleOpen {
            device: device.to_owned(),
            reason: e.to_string(),
        };

        let capture = Capture::from_device(device)
            .map_err(handle_error)?
            .promisc(false)
            .snaplen(SNAPLEN)
            .open()
            .map_err(handle_error)?;

        debug!(device, "opened send handle");
        Ok(Self {
            capture,
            device: device.to_owned(),
        })
    }

    pub fn device(&self) -> &str {
        &self.device
    }
}

impl PacketSender for PcapSender {
    fn send(&mut self, packet: &[u8]) -> Result<()> {
        self.capture
            .sendpacket(packet)
            .map_err(|e| NetworkError::SendFailed(e.to_string()))?;
        Ok(())
    }
}

impl Drop for PcapSender {
    fn drop(&mut self) {
        debug!(device = %self.device, "closing send handle");
    }
}
