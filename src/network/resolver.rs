//! Reconcile the OS and capture enumerations into one sendable device.
//!
//! The user may type either naming scheme. An explicit name match always
//! wins over searching the other list: if the named adapter has no
//! counterpart sharing an IPv4 address, resolution fails loudly instead of
//! binding to some other adapter.

use std::fmt;
use std::net::IpAddr;

use tracing::debug;

use super::inventory::{CaptureDevice, Inventory, OsInterface};
use crate::error::{ResolveError, Subsystem};

/// One OS interface and one capture device that share an IPv4 address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedInterface {
    pub os: OsInterface,
    pub device: CaptureDevice,
}

impl PairedInterface {
    /// Name to open the send handle with.
    pub fn device_name(&self) -> &str {
        &self.device.name
    }

    /// IPv4 addresses both sides agree on.
    pub fn shared_addresses(&self) -> Vec<IpAddr> {
        self.os
            .ips
            .iter()
            .map(|net| net.ip())
            .filter(|ip| ip.is_ipv4() && self.device.addresses.contains(ip))
            .collect()
    }
}

impl fmt::Display for PairedInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.os.name, self.device.name)?;
        if let Some(description) = &self.device.description {
            write!(f, " \"{description}\"")?;
        }
        Ok(())
    }
}

/// Whether two records share at least one IPv4 address.
///
/// OS addresses carry a prefix length; only the address itself is compared.
pub fn shares_address(os: &OsInterface, device: &CaptureDevice) -> bool {
    os.ips
        .iter()
        .map(|net| net.ip())
        .filter(IpAddr::is_ipv4)
        .any(|ip| device.addresses.contains(&ip))
}

impl Inventory {
    /// Find the adapter the user means by `input`.
    ///
    /// OS names are searched first, then capture device names and
    /// descriptions. The first overlapping counterpart in enumeration order
    /// is selected.
    pub fn resolve(&self, input: &str) -> Result<PairedInterface, ResolveError> {
        if let Some(os) = self.interfaces.iter().find(|iface| iface.name == input) {
            debug!(interface = %os.name, "matched OS interface by name");
            let device = self
                .devices
                .iter()
                .find(|device| shares_address(os, device))
                .ok_or_else(|| ResolveError::NoPairedDevice {
                    side: Subsystem::Os,
                    name: os.name.clone(),
                })?;
            return Ok(PairedInterface {
                os: os.clone(),
                device: device.clone(),
            });
        }

        if let Some(device) = self.devices.iter().find(|device| {
            device.name == input || device.description.as_deref() == Some(input)
        }) {
            debug!(device = %device.name, "matched capture device by name");
            let os = self
                .interfaces
                .iter()
                .find(|os| shares_address(os, device))
                .ok_or_else(|| ResolveError::NoPairedDevice {
                    side: Subsystem::Capture,
                    name: device.name.clone(),
                })?;
            return Ok(PairedInterface {
                os: os.clone(),
                device: device.clone(),
            });
        }

        Err(ResolveError::InterfaceNotFound {
            input: input.to_owned(),
        })
    }

    /// Every OS interface / capture device pair sharing an IPv4 address.
    pub fn pairs(&self) -> Vec<PairedInterface> {
        self.interfaces
            .iter()
            .flat_map(|os| {
                self.devices
                    .iter()
                    .filter(|device| shares_address(os, device))
                    .map(|device| PairedInterface {
                        os: os.clone(),
                        device: device.clone(),
                    })
            })
            .collect()
    }
}
