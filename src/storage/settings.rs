use embedded_storage::{ReadStorage, Storage};
use esp_println::println;
use esp_storage::FlashStorage;

use crate::config::{AP_BANDWIDTH_DEFAULT, AP_CHANNEL_DEFAULT, AP_MAX_PEERS_DEFAULT};
use crate::types::Bandwidth;

const SETTINGS_MAGIC: u32 = 0x4D54_4641; // "AFTM"
const SETTINGS_VERSION: u8 = 1;
pub const SETTINGS_RECORD_LEN: usize = 12;

/// Radio tuning held in the last flash sector. The defaults mirror the
/// compile-time configuration: channel 1, HT20, four simultaneous peers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnchorSettings {
    pub channel: u8,
    pub bandwidth: Bandwidth,
    pub max_peers: u8,
}

impl Default for AnchorSettings {
    fn default() -> Self {
        Self {
            channel: AP_CHANNEL_DEFAULT,
            bandwidth: AP_BANDWIDTH_DEFAULT,
            max_peers: AP_MAX_PEERS_DEFAULT,
        }
    }
}

impl AnchorSettings {
    pub fn record_bytes(self) -> [u8; SETTINGS_RECORD_LEN] {
        let mut record = [0xFFu8; SETTINGS_RECORD_LEN];
        record[0..4].copy_from_slice(&SETTINGS_MAGIC.to_le_bytes());
        record[4] = SETTINGS_VERSION;
        record[5] = self.channel;
        record[6] = self.bandwidth.as_persisted();
        record[7] = self.max_peers;
        record[SETTINGS_RECORD_LEN - 1] = checksum8(&record[..SETTINGS_RECORD_LEN - 1]);
        record
    }

    pub fn from_record(record: &[u8; SETTINGS_RECORD_LEN]) -> Option<Self> {
        if record.iter().all(|&byte| byte == 0xFF) {
            return None;
        }
        if u32::from_le_bytes([record[0], record[1], record[2], record[3]]) != SETTINGS_MAGIC {
            return None;
        }
        let expected = checksum8(&record[..SETTINGS_RECORD_LEN - 1]);
        if record[SETTINGS_RECORD_LEN - 1] != expected {
            return None;
        }
        if record[4] != SETTINGS_VERSION {
            return None;
        }
        let channel = record[5];
        if !(1..=13).contains(&channel) {
            return None;
        }
        let bandwidth = Bandwidth::from_persisted(record[6])?;
        Some(Self {
            channel,
            bandwidth,
            max_peers: record[7],
        })
    }
}

pub struct SettingsStore<'d> {
    flash: FlashStorage<'d>,
    offset: u32,
}

impl<'d> SettingsStore<'d> {
    pub fn new(flash_peripheral: esp_hal::peripherals::FLASH<'d>) -> Self {
        let flash = FlashStorage::new(flash_peripheral).multicore_auto_park();
        let capacity = flash.capacity() as u32;
        let offset = capacity.saturating_sub(FlashStorage::SECTOR_SIZE);
        Self { flash, offset }
    }

    /// Loads the settings record. A missing or incompatible record (blank
    /// flash, wrong magic, bad checksum, unknown version) is erased and
    /// rewritten with the defaults; flash faults bubble up as fatal.
    pub fn init(&mut self) -> Result<AnchorSettings, &'static str> {
        let mut record = [0u8; SETTINGS_RECORD_LEN];
        self.flash
            .read(self.offset, &mut record)
            .map_err(|_| "anchor: settings read failed")?;

        if let Some(settings) = AnchorSettings::from_record(&record) {
            return Ok(settings);
        }

        println!("anchor: settings store incompatible, rewriting defaults");
        let defaults = AnchorSettings::default();
        self.flash
            .write(self.offset, &defaults.record_bytes())
            .map_err(|_| "anchor: settings rewrite failed")?;
        Ok(defaults)
    }
}

fn checksum8(bytes: &[u8]) -> u8 {
    let mut acc = 0x5Au8;
    for &byte in bytes {
        acc ^= byte.rotate_left(1);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_roundtrip() {
        let settings = AnchorSettings {
            channel: 6,
            bandwidth: Bandwidth::Ht40,
            max_peers: 2,
        };
        let record = settings.record_bytes();
        let decoded = AnchorSettings::from_record(&record).expect("decode record");
        assert_eq!(decoded, settings);
    }

    #[test]
    fn blank_flash_reads_as_missing() {
        let blank = [0xFFu8; SETTINGS_RECORD_LEN];
        assert!(AnchorSettings::from_record(&blank).is_none());
    }

    #[test]
    fn unknown_version_is_incompatible() {
        let mut record = AnchorSettings::default().record_bytes();
        record[4] = 9;
        record[SETTINGS_RECORD_LEN - 1] = checksum8(&record[..SETTINGS_RECORD_LEN - 1]);
        assert!(AnchorSettings::from_record(&record).is_none());
    }

    #[test]
    fn corrupted_checksum_is_incompatible() {
        let mut record = AnchorSettings::default().record_bytes();
        record[SETTINGS_RECORD_LEN - 1] ^= 0x01;
        assert!(AnchorSettings::from_record(&record).is_none());
    }

    #[test]
    fn out_of_range_channel_is_incompatible() {
        let mut record = AnchorSettings::default().record_bytes();
        record[5] = 0;
        record[SETTINGS_RECORD_LEN - 1] = checksum8(&record[..SETTINGS_RECORD_LEN - 1]);
        assert!(AnchorSettings::from_record(&record).is_none());
    }

    #[test]
    fn defaults_match_compile_time_tuning() {
        let defaults = AnchorSettings::default();
        assert_eq!(defaults.channel, 1);
        assert_eq!(defaults.bandwidth, Bandwidth::Ht20);
        assert_eq!(defaults.max_peers, 4);
    }
}
