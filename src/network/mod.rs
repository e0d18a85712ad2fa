//! Network-related modules: frame construction, interface discovery and
//! raw transmission.

pub mod arp;
pub mod capture;
pub mod inventory;
mod resolver;

pub use arp::{ARP_FRAME_SIZE, BROADCAST_MAC, build_gratuitous_arp};
pub use capture::{PacketSender, PcapSender};
pub use inventory::{CaptureDevice, Inventory, InventorySource, OsInterface, SystemInventory};
pub use resolver::{PairedInterface, shares_address};
