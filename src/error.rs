//! Error types for the Gratuitous ARP announcer.

use std::fmt;
use std::io;

use thiserror::Error;

/// Main error type for garp operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("interface resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Malformed or missing user input, reported before any network activity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("an IPv4 address to announce is required (--ip)")]
    MissingIp,

    #[error("a MAC address to announce is required (--mac)")]
    MissingMac,

    #[error("a network interface is required (--iface)")]
    MissingInterface,

    #[error("invalid IP address: {value:?}")]
    InvalidIp { value: String },

    #[error("only IPv4 addresses can be announced, got {value:?}")]
    NotIpv4 { value: String },

    #[error("invalid MAC address: {value:?}")]
    InvalidMac { value: String },
}

/// Which enumeration subsystem a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsystem {
    /// The operating system's interface list.
    Os,
    /// The packet capture library's device list.
    Capture,
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Os => f.write_str("OS interface"),
            Self::Capture => f.write_str("capture device"),
        }
    }
}

/// Network-related errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("failed to enumerate {subsystem}s: {reason}")]
    Enumeration { subsystem: Subsystem, reason: String },

    #[error("failed to open send handle on {device}: {reason}")]
    HandleOpen { device: String, reason: String },

    #[error("failed to send packet: {0}")]
    SendFailed(String),

    #[error("packet construction failed: {0}")]
    PacketConstruction(String),
}

/// Failure to reconcile the user's interface name with a sendable device.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("interface {input:?} not found; run with --list to see available interfaces")]
    InterfaceNotFound { input: String },

    #[error("{side} {name:?} matched by name but shares no IPv4 address with any {}", .side.other())]
    NoPairedDevice { side: Subsystem, name: String },
}

impl Subsystem {
    /// The opposite enumeration.
    pub const fn other(self) -> Self {
        match self {
            Self::Os => Self::Capture,
            Self::Capture => Self::Os,
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;
