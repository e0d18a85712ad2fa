//! Read-only snapshots of the two interface enumerations.
//!
//! The OS and the capture library name the same adapters differently (for
//! example `Ethernet 2` versus `\Device\NPF_{...}` on Windows). Both views are
//! collected once at startup and reconciled by [`Inventory::resolve`].

use std::net::IpAddr;

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;
use pnet::util::MacAddr;
use tracing::debug;

use crate::error::{NetworkError, Result, Subsystem};

/// An adapter as reported by the operating system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsInterface {
    pub name: String,
    pub mac: Option<MacAddr>,
    pub is_up: bool,
    pub ips: Vec<IpNetwork>,
}

impl From<NetworkInterface> for OsInterface {
    fn from(iface: NetworkInterface) -> Self {
        Self {
            is_up: iface.is_up(),
            name: iface.name,
            mac: iface.mac,
            ips: iface.ips,
        }
    }
}

/// An adapter as reported by the packet capture library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureDevice {
    pub name: String,
    pub description: Option<String>,
    pub addresses: Vec<IpAddr>,
}

impl From<pcap::Device> for CaptureDevice {
    fn from(device: pcap::Device) -> Self {
        Self {
            name: device.name,
            description: device.desc,
            addresses: device.addresses.into_iter().map(|a| a.addr).collect(),
        }
    }
}

/// Source of interface enumerations.
pub trait InventorySource {
    /// List adapters known to the operating system.
    fn os_interfaces(&self) -> Result<Vec<OsInterface>>;

    /// List adapters the capture library can open.
    fn capture_devices(&self) -> Result<Vec<CaptureDevice>>;
}

/// Production source backed by pnet and libpcap.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInventory;

impl InventorySource for SystemInventory {
    fn os_interfaces(&self) -> Result<Vec<OsInterface>> {
        Ok(datalink::interfaces()
            .into_iter()
            .map(OsInterface::from)
            .collect())
    }

    fn capture_devices(&self) -> Result<Vec<CaptureDevice>> {
        let devices = pcap::Device::list().map_err(|e| NetworkError::Enumeration {
            subsystem: Subsystem::Capture,
            reason: e.to_string(),
        })?;
        Ok(devices.into_iter().map(CaptureDevice::from).collect())
    }
}

/// Both enumerations, captured at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    pub interfaces: Vec<OsInterface>,
    pub devices: Vec<CaptureDevice>,
}

impl Inventory {
    pub const fn new(interfaces: Vec<OsInterface>, devices: Vec<CaptureDevice>) -> Self {
        Self {
            interfaces,
            devices,
        }
    }

    /// Enumerate both subsystems. Either failure is fatal.
    pub fn collect<S: InventorySource + ?Sized>(source: &S) -> Result<Self> {
        let interfaces = source.os_interfaces()?;
        let devices = source.capture_devices()?;
        debug!(
            interfaces = interfaces.len(),
            devices = devices.len(),
            "collected interface inventory"
        );
        Ok(Self::new(interfaces, devices))
    }
}
