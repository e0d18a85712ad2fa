//! Integration tests for the announcement flow.
//!
//! These tests drive validation, interface resolution and scheduling with
//! fabricated enumerations and a recording sender; no device is opened.

use std::cell::Cell;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use garp::Error;
use garp::announcer::{Announcer, RunSummary, Schedule};
use garp::config::Config;
use garp::error::{ResolveError, Subsystem, ValidationError};
use garp::network::{
    BROADCAST_MAC, CaptureDevice, Inventory, InventorySource, OsInterface, PacketSender,
};
use pnet::packet::Packet;
use pnet::packet::arp::{ArpOperations, ArpPacket};
use pnet::packet::ethernet::EthernetPacket;
use pnet::util::MacAddr;
use tokio_util::sync::CancellationToken;

/// Enumeration source backed by fixed data.
struct TestInventory {
    inventory: Inventory,
    calls: Cell<usize>,
}

impl TestInventory {
    fn new(inventory: Inventory) -> Self {
        Self {
            inventory,
            calls: Cell::new(0),
        }
    }
}

impl InventorySource for TestInventory {
    fn os_interfaces(&self) -> garp::Result<Vec<OsInterface>> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.inventory.interfaces.clone())
    }

    fn capture_devices(&self) -> garp::Result<Vec<CaptureDevice>> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.inventory.devices.clone())
    }
}

/// Sender that records every frame handed to it.
#[derive(Clone, Default)]
struct RecordingSender {
    frames: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl RecordingSender {
    fn frames(&self) -> Vec<Vec<u8>> {
        self.frames.lock().unwrap().clone()
    }
}

impl PacketSender for RecordingSender {
    fn send(&mut self, packet: &[u8]) -> garp::Result<()> {
        self.frames.lock().unwrap().push(packet.to_vec());
        Ok(())
    }
}

/// One host with two adapters; only the wired one is visible to both sides.
fn host() -> Inventory {
    Inventory::new(
        vec![
            OsInterface {
                name: "lo".into(),
                mac: None,
                is_up: true,
                ips: vec!["127.0.0.1/8".parse().unwrap(), "::1/128".parse().unwrap()],
            },
            OsInterface {
                name: "enp3s0".into(),
                mac: Some(MacAddr::new(0x00, 0x1b, 0x21, 0x3a, 0x4f, 0x5e)),
                is_up: true,
                ips: vec![
                    "192.168.1.20/24".parse().unwrap(),
                    "fe80::21b:21ff:fe3a:4f5e/64".parse().unwrap(),
                ],
            },
        ],
        vec![
            CaptureDevice {
                name: "any".into(),
                description: Some("Pseudo-device that captures on all interfaces".into()),
                addresses: vec![],
            },
            CaptureDevice {
                name: "pcap0".into(),
                description: Some("Onboard LAN".into()),
                addresses: vec!["192.168.1.20".parse().unwrap()],
            },
        ],
    )
}

fn config(interface: &str, ip: &str) -> Config {
    Config {
        interface: Some(interface.into()),
        ip: Some(ip.into()),
        mac: Some("aa:bb:cc:dd:ee:ff".into()),
        interval: None,
    }
}

#[test]
fn should_resolve_same_pair_from_either_name() {
    let inventory = host();

    let by_os = inventory.resolve("enp3s0").unwrap();
    let by_device = inventory.resolve("pcap0").unwrap();
    let by_description = inventory.resolve("Onboard LAN").unwrap();

    assert_eq!(by_os.device_name(), "pcap0");
    assert_eq!(by_os, by_device);
    assert_eq!(by_os, by_description);
}

#[test]
fn should_report_unknown_interface() {
    let source = TestInventory::new(host());

    let err = config("wlan0", "192.168.1.50").prepare(&source).unwrap_err();
    assert!(matches!(
        err,
        Error::Resolve(ResolveError::InterfaceNotFound { ref input }) if input == "wlan0"
    ));
}

#[test]
fn should_report_unpaired_loopback() {
    let source = TestInventory::new(host());

    let err = config("lo", "192.168.1.50").prepare(&source).unwrap_err();
    assert!(matches!(
        err,
        Error::Resolve(ResolveError::NoPairedDevice {
            side: Subsystem::Os,
            ..
        })
    ));
}

#[test]
fn should_validate_before_enumerating() {
    let source = TestInventory::new(host());

    let err = config("enp3s0", "999.1.1.1").prepare(&source).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidIp { .. })
    ));
    assert_eq!(source.calls.get(), 0);
}

#[tokio::test]
async fn should_send_one_gratuitous_arp_without_interval() {
    let source = TestInventory::new(host());
    let (settings, paired) = config("enp3s0", "192.168.1.50").prepare(&source).unwrap();
    assert_eq!(paired.device_name(), "pcap0");
    assert_eq!(settings.schedule, Schedule::Once);

    let sender = RecordingSender::default();
    let announcer = Announcer::new(sender.clone(), settings.binding).unwrap();
    let summary = announcer
        .run(settings.schedule, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(summary.attempts, 1);
    let frames = sender.frames();
    assert_eq!(frames.len(), 1);

    let eth = EthernetPacket::new(&frames[0]).unwrap();
    assert_eq!(eth.get_destination(), BROADCAST_MAC);
    let arp = ArpPacket::new(eth.payload()).unwrap();
    assert_eq!(arp.get_operation(), ArpOperations::Reply);
    assert_eq!(arp.get_sender_proto_addr(), Ipv4Addr::new(192, 168, 1, 50));
    assert_eq!(arp.get_target_proto_addr(), Ipv4Addr::new(192, 168, 1, 50));
    assert_eq!(arp.get_target_hw_addr(), BROADCAST_MAC);
}

#[tokio::test(start_paused = true)]
async fn should_announce_every_interval_until_cancelled() {
    let source = TestInventory::new(host());
    let mut request = config("pcap0", "192.168.1.50");
    request.interval = Some(Duration::from_secs(2));
    let (settings, _) = request.prepare(&source).unwrap();

    let sender = RecordingSender::default();
    let announcer = Announcer::new(sender.clone(), settings.binding).unwrap();
    let shutdown = CancellationToken::new();
    let task = tokio::spawn(announcer.run(settings.schedule, shutdown.clone()));

    tokio::time::sleep(Duration::from_secs(7)).await;
    shutdown.cancel();
    let summary = task.await.unwrap().unwrap();

    assert_eq!(
        summary,
        RunSummary {
            attempts: 3,
            failures: 0
        }
    );
    let frames = sender.frames();
    assert_eq!(frames.len(), 3);
    assert!(frames.windows(2).all(|pair| pair[0] == pair[1]));
}
