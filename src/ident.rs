use core::fmt::Write;

use heapless::String;

use crate::types::{Bssid, AP_SSID_MAX};

/// Network name prefix for the anchor AP.
const ANCHOR_SSID_PREFIX: &str = "ftm_";

/// Derives the anchor's network name from the base hardware address:
/// `ftm_` followed by twelve uppercase hex digits, no separators.
pub fn anchor_ssid(mac: Bssid) -> String<AP_SSID_MAX> {
    let mut ssid = String::new();
    let _ = write!(
        ssid,
        "{}{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
        ANCHOR_SSID_PREFIX, mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    );
    ssid
}
