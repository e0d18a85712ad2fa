//! Configuration loading and validation.
//!
//! Settings come from an optional TOML file and command-line flags; flags
//! win. Raw values stay strings until [`Config::into_settings`] so that a
//! malformed address is reported the same way wherever it came from.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::address::AddressPair;
use crate::announcer::Schedule;
use crate::error::{ConfigError, Result, ValidationError};
use crate::network::{Inventory, InventorySource, PairedInterface};

/// Raw configuration, as read from a file or assembled from flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Interface to announce on: an OS interface name, or a capture device
    /// name or description.
    pub interface: Option<String>,

    /// IPv4 address to announce.
    pub ip: Option<String>,

    /// MAC address the IP should resolve to.
    pub mac: Option<String>,

    /// Delay between announcements (e.g. "30s", "1m"). Absent or zero sends
    /// a single frame.
    #[serde(default, with = "humantime_serde")]
    pub interval: Option<Duration>,
}

/// Validated settings ready to drive an announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub interface: String,
    pub binding: AddressPair,
    pub schedule: Schedule,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content).map_err(ConfigError::Parse)?)
    }

    /// Overlay `overrides` on top of `self`; set fields in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            interface: overrides.interface.or(self.interface),
            ip: overrides.ip.or(self.ip),
            mac: overrides.mac.or(self.mac),
            interval: overrides.interval.or(self.interval),
        }
    }

    /// Validate into typed settings. Touches no network state.
    pub fn into_settings(self) -> std::result::Result<Settings, ValidationError> {
        let ip = self.ip.ok_or(ValidationError::MissingIp)?;
        let mac = self.mac.ok_or(ValidationError::MissingMac)?;
        let binding = AddressPair::parse(&ip, &mac)?;
        let interface = self
            .interface
            .filter(|name| !name.is_empty())
            .ok_or(ValidationError::MissingInterface)?;

        Ok(Settings {
            interface,
            binding,
            schedule: Schedule::from_interval(self.interval),
        })
    }

    /// Validate, then enumerate interfaces and resolve the requested one.
    ///
    /// Invalid input is rejected before either enumeration runs.
    pub fn prepare<S: InventorySource + ?Sized>(
        self,
        source: &S,
    ) -> Result<(Settings, PairedInterface)> {
        let settings = self.into_settings()?;
        let inventory = Inventory::collect(source)?;
        let paired = inventory.resolve(&settings.interface)?;
        Ok((settings, paired))
    }
}
