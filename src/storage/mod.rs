mod settings;

pub use settings::{AnchorSettings, SettingsStore, SETTINGS_RECORD_LEN};
