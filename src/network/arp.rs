//! Gratuitous ARP frame construction.
//!
//! A Gratuitous ARP is an unsolicited ARP *reply* broadcast on the segment.
//! Sender and target protocol addresses are both the announced IP, so every
//! receiver updates its cache entry for that IP to the announced MAC.

use std::net::Ipv4Addr;

use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, MutableEthernetPacket};
use pnet::util::MacAddr;

use crate::address::AddressPair;
use crate::error::{NetworkError, Result};

/// Broadcast MAC address.
pub const BROADCAST_MAC: MacAddr = MacAddr(0xff, 0xff, 0xff, 0xff, 0xff, 0xff);

/// Size of an Ethernet header.
const ETHERNET_HEADER_SIZE: usize = 14;

/// Size of an ARP packet payload for Ethernet/IPv4.
const ARP_PACKET_SIZE: usize = 28;

/// Size of an Ethernet frame with ARP payload.
pub const ARP_FRAME_SIZE: usize = ETHERNET_HEADER_SIZE + ARP_PACKET_SIZE;

/// Build a Gratuitous ARP frame announcing that `ip` is at `mac`.
pub fn build_gratuitous_arp(ip: Ipv4Addr, mac: MacAddr) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; ARP_FRAME_SIZE];

    {
        let mut ethernet = MutableEthernetPacket::new(&mut buffer).ok_or_else(|| {
            NetworkError::PacketConstruction("Ethernet frame creation failed".into())
        })?;
        ethernet.set_destination(BROADCAST_MAC);
        ethernet.set_source(mac);
        ethernet.set_ethertype(EtherTypes::Arp);
    }

    {
        let mut arp = MutableArpPacket::new(&mut buffer[ETHERNET_HEADER_SIZE..])
            .ok_or_else(|| NetworkError::PacketConstruction("ARP packet creation failed".into()))?;
        arp.set_hardware_type(ArpHardwareTypes::Ethernet);
        arp.set_protocol_type(EtherTypes::Ipv4);
        arp.set_hw_addr_len(6);
        arp.set_proto_addr_len(4);
        arp.set_operation(ArpOperations::Reply);
        arp.set_sender_hw_addr(mac);
        arp.set_sender_proto_addr(ip);
        arp.set_target_hw_addr(BROADCAST_MAC);
        arp.set_target_proto_addr(ip);
    }

    Ok(buffer)
}

impl AddressPair {
    /// Build the Gratuitous ARP frame for this binding.
    pub fn to_frame(&self) -> Result<Vec<u8>> {
        build_gratuitous_arp(self.ip, self.mac)
    }
}
