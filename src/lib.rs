//! garp - announce an IPv4-to-MAC binding with Gratuitous ARP.
//!
//! A Gratuitous ARP is an unsolicited ARP reply broadcast on the local
//! segment. Hosts and switches that receive it update their caches with the
//! announced binding, which makes it useful for IP takeover, failover and
//! address-conflict testing.
//!
//! # Architecture
//!
//! - [`address`]: the announced IPv4/MAC binding
//! - [`network`]: frame construction, interface discovery, raw sending
//! - [`announcer`]: single-shot and periodic scheduling
//! - [`config`]: configuration loading and validation
//! - [`error`]: error types
//!
//! # Resolving an interface
//!
//! The OS and the capture library enumerate adapters under different names.
//! Both snapshots are reconciled through shared IPv4 addresses:
//!
//! ```rust
//! use garp::network::{CaptureDevice, Inventory, OsInterface};
//!
//! let inventory = Inventory::new(
//!     vec![OsInterface {
//!         name: "Ethernet".into(),
//!         mac: None,
//!         is_up: true,
//!         ips: vec!["192.168.1.10/24".parse().unwrap()],
//!     }],
//!     vec![CaptureDevice {
//!         name: r"\Device\NPF_{AAAA}".into(),
//!         description: Some("Intel(R) Ethernet".into()),
//!         addresses: vec!["192.168.1.10".parse().unwrap()],
//!     }],
//! );
//!
//! let pair = inventory.resolve("Ethernet").unwrap();
//! assert_eq!(pair.device_name(), r"\Device\NPF_{AAAA}");
//! ```

pub mod address;
pub mod announcer;
pub mod config;
pub mod error;
pub mod network;

pub use error::{Error, Result};
