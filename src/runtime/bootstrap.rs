use embassy_net::Runner;
use esp_hal::{efuse::Efuse, timer::timg::TimerGroup};
use esp_println::println;
use esp_radio::wifi::{WifiController, WifiDevice};
use heapless::String;

use crate::config::{AP_PASSPHRASE, RADIO_HEAP_BYTES};
use crate::ident::anchor_ssid;
use crate::link::{run_link_supervisor, LinkContext};
use crate::radio::{ap, RadioSession};
use crate::storage::{AnchorSettings, SettingsStore};
use crate::types::{Bandwidth, AP_SSID_MAX};

// Application-root ownership of the shared link state; every task gets it
// by reference.
static ANCHOR_LINK: LinkContext = LinkContext::new();

pub fn run() -> ! {
    let peripherals = esp_hal::init(esp_hal::Config::default());
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);
    esp_alloc::heap_allocator!(size: RADIO_HEAP_BYTES);

    print_banner();

    let mut settings_store = SettingsStore::new(peripherals.FLASH);
    let settings = match settings_store.init() {
        Ok(settings) => settings,
        Err(err) => fatal(err),
    };

    let session = match RadioSession::bootstrap(peripherals.WIFI, settings) {
        Ok(session) => session,
        Err(err) => fatal(err),
    };
    let RadioSession {
        controller,
        net_runner,
        bandwidth,
    } = session;

    let ssid = anchor_ssid(Efuse::mac_address());

    let mut executor = esp_rtos::embassy::Executor::new();
    let executor = unsafe { make_static(&mut executor) };
    executor.run(move |spawner| {
        spawner.must_spawn(net_task(net_runner));
        spawner.must_spawn(anchor_task(controller, bandwidth, ssid, settings));
    });
}

#[embassy_executor::task]
async fn anchor_task(
    mut controller: WifiController<'static>,
    bandwidth: Bandwidth,
    ssid: String<AP_SSID_MAX>,
    settings: AnchorSettings,
) {
    let profile = ap::ApProfile::new(ssid.as_str(), AP_PASSPHRASE, settings);
    if let Err(err) = ap::activate(&mut controller, &ANCHOR_LINK, &profile).await {
        fatal(err);
    }

    println!("BW = {}MHz", bandwidth.mhz());
    println!(
        "Starting SoftAP with FTM Responder support, SSID - {}",
        ssid
    );

    run_link_supervisor(&ANCHOR_LINK, controller).await
}

#[embassy_executor::task]
async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}

fn print_banner() {
    println!();
    println!(" ==========================================================");
    println!(" |                     ESP32 FTM ANCHOR                   |");
    println!(" ==========================================================");
    println!();
}

fn fatal(err: &'static str) -> ! {
    println!("anchor: fatal: {}", err);
    halt_forever()
}

fn halt_forever() -> ! {
    loop {
        core::hint::spin_loop();
    }
}

unsafe fn make_static<T>(value: &mut T) -> &'static mut T {
    unsafe { core::mem::transmute(value) }
}
