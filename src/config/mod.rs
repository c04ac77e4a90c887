pub(crate) mod channels;

use crate::types::Bandwidth;

pub(crate) const AP_PASSPHRASE: &str = "ftmftmftmftm";
pub(crate) const AP_CHANNEL_DEFAULT: u8 = 1;
pub(crate) const AP_BANDWIDTH_DEFAULT: Bandwidth = Bandwidth::Ht20;
pub(crate) const AP_MAX_PEERS_DEFAULT: u8 = 4;
// Internal-RAM heap; the wifi driver cannot allocate from external PSRAM.
pub(crate) const RADIO_HEAP_BYTES: usize = 72 * 1024;
