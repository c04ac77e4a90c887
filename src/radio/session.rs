use core::sync::atomic::{AtomicBool, Ordering};

use embassy_net::{Ipv4Address, Ipv4Cidr, Runner, StackResources, StaticConfigV4};
use esp_hal::rng::Rng;
use esp_println::println;
use esp_radio::wifi::{
    event::{self, EventExt},
    Config as WifiRuntimeConfig, WifiController, WifiDevice,
};
use static_cell::StaticCell;

use crate::config::channels::LINK_EVENTS;
use crate::storage::AnchorSettings;
use crate::types::{Bandwidth, LinkEvent};

const WIFI_RX_QUEUE_SIZE: usize = 3;
const WIFI_TX_QUEUE_SIZE: usize = 2;
const WIFI_STATIC_RX_BUF_NUM: u8 = 4;
const WIFI_DYNAMIC_RX_BUF_NUM: u16 = 8;
const WIFI_DYNAMIC_TX_BUF_NUM: u16 = 8;
const WIFI_RX_BA_WIN: u8 = 3;

// The anchor's own network; nothing routes past it.
const AP_IPV4_ADDRESS: Ipv4Address = Ipv4Address::new(192, 168, 4, 1);
const AP_IPV4_PREFIX: u8 = 24;

static RADIO_BOOTSTRAPPED: AtomicBool = AtomicBool::new(false);
static LINK_HANDLERS_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Radio driver state produced by the one-time bootstrap. The controller is
/// left stopped until AP activation applies a mode configuration; driver
/// settings live in RAM only on this stack, nothing is written back to flash
/// between reboots.
pub(crate) struct RadioSession {
    pub(crate) controller: WifiController<'static>,
    pub(crate) net_runner: Runner<'static, WifiDevice<'static>>,
    pub(crate) bandwidth: Bandwidth,
}

impl RadioSession {
    pub(crate) fn bootstrap(
        wifi: esp_hal::peripherals::WIFI<'static>,
        settings: AnchorSettings,
    ) -> Result<Self, &'static str> {
        // The controller cannot be re-issued, so a second bootstrap is an
        // explicit error rather than a silent no-op. Handler registration
        // below stays idempotent on its own.
        if RADIO_BOOTSTRAPPED.swap(true, Ordering::Relaxed) {
            return Err("anchor: radio session already bootstrapped");
        }

        static RADIO_CTRL: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();
        static STACK_RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();

        let radio_ctrl = esp_radio::init().map_err(|err| {
            println!("anchor: esp_radio::init err={:?}", err);
            "anchor: radio subsystem init failed"
        })?;
        let radio_ctrl = RADIO_CTRL.init(radio_ctrl);
        let (controller, ifaces) = esp_radio::wifi::new(radio_ctrl, wifi, wifi_runtime_config())
            .map_err(|err| {
                println!("anchor: wifi driver init err={:?}", err);
                "anchor: wifi driver init failed"
            })?;

        install_link_event_handlers();

        let rng = Rng::new();
        let seed = (rng.random() as u64) << 32 | rng.random() as u64;
        let (_stack, net_runner) = embassy_net::new(
            ifaces.ap,
            embassy_net::Config::ipv4_static(StaticConfigV4 {
                address: Ipv4Cidr::new(AP_IPV4_ADDRESS, AP_IPV4_PREFIX),
                gateway: None,
                dns_servers: heapless::Vec::new(),
            }),
            STACK_RESOURCES.init(StackResources::<3>::new()),
            seed,
        );

        Ok(Self {
            controller,
            net_runner,
            bandwidth: settings.bandwidth,
        })
    }
}

fn wifi_runtime_config() -> WifiRuntimeConfig {
    WifiRuntimeConfig::default()
        .with_rx_queue_size(WIFI_RX_QUEUE_SIZE)
        .with_tx_queue_size(WIFI_TX_QUEUE_SIZE)
        .with_static_rx_buf_num(WIFI_STATIC_RX_BUF_NUM)
        .with_dynamic_rx_buf_num(WIFI_DYNAMIC_RX_BUF_NUM)
        .with_dynamic_tx_buf_num(WIFI_DYNAMIC_TX_BUF_NUM)
        .with_ampdu_rx_enable(false)
        .with_ampdu_tx_enable(false)
        .with_rx_ba_win(WIFI_RX_BA_WIN)
}

/// Registers the two station-link event hooks. Returns whether installation
/// happened; repeated calls are no-ops.
pub fn install_link_event_handlers() -> bool {
    if LINK_HANDLERS_INSTALLED.swap(true, Ordering::Relaxed) {
        return false;
    }

    event::StaConnected::update_handler(|event| {
        forward_link_event(LinkEvent::Connected {
            bssid: event.bssid(),
            channel: event.channel(),
        });
    });

    event::StaDisconnected::update_handler(|event| {
        let reason = event.reason();
        println!(
            "anchor: sta_disconnected reason={} ({})",
            reason,
            disconnect_reason_label(reason)
        );
        forward_link_event(LinkEvent::Disconnected);
    });

    true
}

// Runs on the radio task; must not block the dispatcher.
fn forward_link_event(event: LinkEvent) {
    if LINK_EVENTS.try_send(event).is_err() {
        println!("anchor: link event queue full, {:?} dropped", event);
    }
}

fn disconnect_reason_label(reason: u8) -> &'static str {
    match reason {
        200 => "beacon_timeout",
        201 => "no_ap_found",
        202 => "auth_fail",
        203 => "assoc_fail",
        204 => "handshake_timeout",
        205 => "connection_fail",
        210 => "no_ap_found_compatible_security",
        211 => "no_ap_found_authmode_threshold",
        212 => "no_ap_found_rssi_threshold",
        _ => "other",
    }
}
