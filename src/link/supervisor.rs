use esp_println::println;
use esp_radio::wifi::WifiController;

use crate::config::channels::LINK_EVENTS;
use crate::types::LinkEvent;

use super::actions::LinkAction;
use super::context::LinkContext;
use super::engine::LinkEngine;
use super::snapshot::LinkSnapshot;

/// Serial dispatch loop for station-link events. Being the only consumer of
/// the queue and the only writer of the signal is what keeps the clear+set
/// bit updates race free.
pub(crate) async fn run_link_supervisor(
    link: &'static LinkContext,
    mut controller: WifiController<'static>,
) -> ! {
    let mut engine = LinkEngine::new(LinkSnapshot::default());
    loop {
        let event = LINK_EVENTS.receive().await;
        let result = engine.apply(event, link.reconnect_policy().enabled());
        link.publish(result.after.status);
        log_transition(event, result.action);
        if matches!(result.action, LinkAction::RequestReconnect) {
            // Fire and forget: a failed attempt resurfaces as a later
            // disconnect event instead of being handled here.
            if let Err(err) = controller.connect() {
                println!("anchor: reconnect request err={:?}", err);
            }
        }
    }
}

fn log_transition(event: LinkEvent, action: LinkAction) {
    match event {
        LinkEvent::Connected { bssid, channel } => {
            println!(
                "anchor: peer connected bssid={:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X} channel={}",
                bssid[0], bssid[1], bssid[2], bssid[3], bssid[4], bssid[5], channel
            );
        }
        LinkEvent::Disconnected => match action {
            LinkAction::RequestReconnect => println!("anchor: sta disconnect, reconnecting"),
            LinkAction::None => println!("anchor: sta disconnect"),
        },
    }
}
