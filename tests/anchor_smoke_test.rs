//! On-target checks for the connectivity core: signal contract, state
//! machine properties, AP profile policy, and event hook registration.

#![no_std]
#![no_main]

#[cfg(test)]
#[embedded_test::tests(executor = esp_rtos::embassy::Executor::new())]
mod tests {
    use embassy_time::Duration;
    use ftm_anchor::ident::anchor_ssid;
    use ftm_anchor::link::{
        LinkAction, LinkContext, LinkEngine, LinkSnapshot, WaitOutcome, CONNECTED_BIT,
        DISCONNECTED_BIT,
    };
    use ftm_anchor::radio::{ap_mode_config, install_link_event_handlers, ApProfile};
    use ftm_anchor::storage::AnchorSettings;
    use ftm_anchor::types::{LinkEvent, LinkStatus};

    const PEER: [u8; 6] = [0xAA, 0xBB, 0xCC, 0x11, 0x22, 0x33];

    #[init]
    fn init() {
        let peripherals = esp_hal::init(esp_hal::Config::default());
        let timg0 = esp_hal::timer::timg::TimerGroup::new(peripherals.TIMG0);
        esp_rtos::start(timg0.timer0);
    }

    #[test]
    async fn wait_observes_published_connected_bit() {
        let link = LinkContext::new();
        link.publish(LinkStatus::Connected);
        let outcome = link
            .signal()
            .wait(CONNECTED_BIT, Duration::from_millis(10))
            .await;
        assert!(outcome.observed());
        assert!(!link.signal().is_set(DISCONNECTED_BIT));
    }

    #[test]
    async fn wait_timeout_is_a_normal_distinguishable_outcome() {
        let link = LinkContext::new();
        let outcome = link
            .signal()
            .wait(CONNECTED_BIT, Duration::from_millis(20))
            .await;
        assert_eq!(outcome, WaitOutcome::TimedOut);
        assert_eq!(link.signal().bits(), 0);
    }

    #[test]
    async fn status_bits_never_both_set_across_transitions() {
        let link = LinkContext::new();
        for status in [
            LinkStatus::Connected,
            LinkStatus::Disconnected,
            LinkStatus::Connected,
            LinkStatus::Connected,
            LinkStatus::Disconnected,
        ] {
            link.publish(status);
            let bits = link.signal().bits();
            assert!(bits == CONNECTED_BIT || bits == DISCONNECTED_BIT);
        }
        let outcome = link
            .signal()
            .wait(DISCONNECTED_BIT, Duration::from_millis(10))
            .await;
        assert!(outcome.observed());
    }

    #[test]
    fn engine_tracks_events_and_reconnect_policy() {
        let mut engine = LinkEngine::new(LinkSnapshot::default());

        let up = engine.apply(
            LinkEvent::Connected {
                bssid: PEER,
                channel: 1,
            },
            true,
        );
        assert!(matches!(up.after.status, LinkStatus::Connected));
        assert!(matches!(up.action, LinkAction::None));

        let down = engine.apply(LinkEvent::Disconnected, true);
        assert!(matches!(down.action, LinkAction::RequestReconnect));

        let down_disabled = engine.apply(LinkEvent::Disconnected, false);
        assert!(matches!(down_disabled.action, LinkAction::None));
    }

    #[test]
    fn derived_ssid_matches_fixed_ascii_pattern() {
        let ssid = anchor_ssid(PEER);
        assert_eq!(ssid.as_str(), "ftm_AABBCC112233");
    }

    #[test]
    fn anchor_activation_scenario_disables_reconnect_with_wpa2() {
        let link = LinkContext::new();
        assert!(link.reconnect_policy().enabled());

        let ssid = anchor_ssid(PEER);
        let profile = ApProfile::new(ssid.as_str(), "ftmftmftmftm", AnchorSettings::default());
        let _mode = ap_mode_config(&link, &profile);

        assert!(!link.reconnect_policy().enabled());
        assert!(matches!(
            profile.auth_method,
            esp_radio::wifi::AuthMethod::Wpa2Personal
        ));
        assert_eq!(profile.channel, 1);
    }

    #[test]
    fn event_hooks_register_exactly_once() {
        assert!(install_link_event_handlers());
        assert!(!install_link_event_handlers());
    }
}
