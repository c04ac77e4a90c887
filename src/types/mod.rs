mod base;
mod link;

pub use base::{Bandwidth, Bssid, AP_PASSPHRASE_MAX, AP_SSID_MAX};
pub use link::{LinkEvent, LinkStatus, PeerInfo};
