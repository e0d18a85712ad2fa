//! The IPv4-to-MAC binding being announced.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use pnet::util::MacAddr;

use crate::error::ValidationError;

/// An IPv4 address and the hardware address it should resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressPair {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

impl AddressPair {
    pub const fn new(ip: Ipv4Addr, mac: MacAddr) -> Self {
        Self { ip, mac }
    }

    /// Parse a dotted-quad IPv4 address and a MAC address.
    ///
    /// The MAC may use either `:` or `-` between its six octets.
    pub fn parse(ip: &str, mac: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(parse_ipv4(ip)?, parse_mac(mac)?))
    }
}

impl fmt::Display for AddressPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.ip, self.mac)
    }
}

fn parse_ipv4(value: &str) -> Result<Ipv4Addr, ValidationError> {
    match value.trim().parse::<IpAddr>() {
        Ok(IpAddr::V4(ip)) => Ok(ip),
        Ok(IpAddr::V6(_)) => Err(ValidationError::NotIpv4 {
            value: value.to_owned(),
        }),
        Err(_) => Err(ValidationError::InvalidIp {
            value: value.to_owned(),
        }),
    }
}

fn parse_mac(value: &str) -> Result<MacAddr, ValidationError> {
    let normalized = value.trim().replace('-', ":");
    normalized
        .parse::<MacAddr>()
        .map_err(|_| ValidationError::InvalidMac {
            value: value.to_owned(),
        })
}
