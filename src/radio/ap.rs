use esp_println::println;
use esp_radio::wifi::{AccessPointConfig, AuthMethod, ModeConfig, WifiController};
use heapless::String;

use crate::link::LinkContext;
use crate::storage::AnchorSettings;
use crate::types::{AP_PASSPHRASE_MAX, AP_SSID_MAX};

/// One-shot soft-AP configuration. Inputs longer than the driver's fixed
/// buffers are truncated, not rejected.
#[derive(Clone, Debug)]
pub struct ApProfile {
    pub ssid: String<AP_SSID_MAX>,
    pub passphrase: String<AP_PASSPHRASE_MAX>,
    pub auth_method: AuthMethod,
    pub channel: u8,
    pub max_peers: u8,
}

impl ApProfile {
    /// An empty passphrase falls back to an open network instead of failing.
    /// That is a usability default, not an oversight; callers who want a
    /// different mode override it with [`ApProfile::with_auth_method`].
    pub fn new(ssid: &str, passphrase: &str, settings: AnchorSettings) -> Self {
        let ssid = truncated(ssid);
        let passphrase: String<AP_PASSPHRASE_MAX> = truncated(passphrase);
        let auth_method = if passphrase.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::Wpa2Personal
        };
        Self {
            ssid,
            passphrase,
            auth_method,
            channel: settings.channel,
            max_peers: settings.max_peers,
        }
    }

    pub fn with_auth_method(mut self, auth_method: AuthMethod) -> Self {
        self.auth_method = auth_method;
        self
    }

    fn mode_config(&self) -> ModeConfig {
        ModeConfig::AccessPoint(
            AccessPointConfig::default()
                .with_ssid(self.ssid.as_str().into())
                .with_password(self.passphrase.as_str().into())
                .with_auth_method(self.auth_method)
                .with_channel(self.channel)
                .with_max_connections(self.max_peers as u16),
        )
    }
}

/// Commits the device to the anchor role: an AP does not rejoin anybody's
/// network as a client, so the reconnect policy goes down before the driver
/// configuration is produced.
pub fn ap_mode_config(link: &LinkContext, profile: &ApProfile) -> ModeConfig {
    link.reconnect_policy().disable();
    profile.mode_config()
}

pub(crate) async fn activate(
    controller: &mut WifiController<'static>,
    link: &LinkContext,
    profile: &ApProfile,
) -> Result<(), &'static str> {
    let mode = ap_mode_config(link, profile);
    controller.set_config(&mode).map_err(|err| {
        println!("anchor: ap config err={:?}", err);
        "anchor: ap config rejected"
    })?;
    controller.start_async().await.map_err(|err| {
        println!("anchor: wifi start err={:?}", err);
        "anchor: wifi start failed"
    })?;
    Ok(())
}

fn truncated<const N: usize>(input: &str) -> String<N> {
    let mut end = input.len().min(N);
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::new();
    let _ = out.push_str(&input[..end]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_passphrase_falls_back_to_open_auth() {
        let profile = ApProfile::new("ftm_AABBCC112233", "", AnchorSettings::default());
        assert!(matches!(profile.auth_method, AuthMethod::None));
        assert!(profile.passphrase.is_empty());
    }

    #[test]
    fn passphrase_selects_wpa2_psk() {
        let profile = ApProfile::new("ftm_AABBCC112233", "ftmftmftmftm", AnchorSettings::default());
        assert!(matches!(profile.auth_method, AuthMethod::Wpa2Personal));
        assert_eq!(profile.passphrase.as_str(), "ftmftmftmftm");
    }

    #[test]
    fn auth_method_is_overridable() {
        let profile = ApProfile::new("ftm_AABBCC112233", "ftmftmftmftm", AnchorSettings::default())
            .with_auth_method(AuthMethod::Wpa2Wpa3Personal);
        assert!(matches!(profile.auth_method, AuthMethod::Wpa2Wpa3Personal));
    }

    #[test]
    fn overlong_ssid_is_truncated_not_rejected() {
        // Max length plus five characters; only the first 32 survive.
        let long = "0123456789012345678901234567890123456";
        assert_eq!(long.len(), AP_SSID_MAX + 5);
        let profile = ApProfile::new(long, "ftmftmftmftm", AnchorSettings::default());
        assert_eq!(profile.ssid.len(), AP_SSID_MAX);
        assert_eq!(profile.ssid.as_str(), &long[..AP_SSID_MAX]);
    }

    #[test]
    fn overlong_passphrase_is_truncated() {
        let raw = [b'x'; AP_PASSPHRASE_MAX + 5];
        let long = core::str::from_utf8(&raw).unwrap();
        let profile = ApProfile::new("ftm_AABBCC112233", long, AnchorSettings::default());
        assert_eq!(profile.passphrase.len(), AP_PASSPHRASE_MAX);
    }

    #[test]
    fn committing_to_ap_role_disables_reconnect() {
        let link = crate::link::LinkContext::new();
        assert!(link.reconnect_policy().enabled());
        let profile = ApProfile::new("ftm_AABBCC112233", "ftmftmftmftm", AnchorSettings::default());
        let _mode = ap_mode_config(&link, &profile);
        assert!(!link.reconnect_policy().enabled());
        assert!(matches!(profile.auth_method, AuthMethod::Wpa2Personal));
    }
}
