//! serial-mouse - moves a BLE mouse from serial console lines.
//!
//! nRF52840 + S140 SoftDevice. Connect to the board's VCOM at 115200 8N1,
//! pair with `HID_Mouse` using the passkey printed on the console,
//! then type `x y` and Enter to click with a relative move of (x, y).

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::{bind_interrupts, peripherals, uarte};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use serial2blehid::advertising::AdvertisingData;
use serial2blehid::ble::{self, HidServer, PasskeyDisplay, SharedSession, SoftdeviceLink, SoftdeviceRegistry};
use serial2blehid::config::{CONSOLE_EVENT_DEPTH, MOUSE_DEVICE_NAME, MOUSE_PRODUCT_ID};
use serial2blehid::hid::mouse::MOUSE_REPORT_MAP;
use serial2blehid::service::{DeviceInformation, Registration};
use serial2blehid::session::{BootMouseService, ConsoleEvent, Profile};

bind_interrupts!(struct Irqs {
    UARTE0_UART0 => uarte::InterruptHandler<peripherals::UARTE0>;
});

type Session = BootMouseService<SoftdeviceLink>;

static CONSOLE: Channel<CriticalSectionRawMutex, ConsoleEvent, CONSOLE_EVENT_DEPTH> = Channel::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn serial_task(
    uart: uarte::Uarte<'static, peripherals::UARTE0>,
    session: &'static SharedSession<Session>,
) -> ! {
    ble::serial::run(uart, session, CONSOLE.receiver()).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    info!("serial-mouse starting");

    // SoftDevice reserves priorities 0, 1 and 4.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);

    interrupt::UARTE0_UART0.set_priority(Priority::P3);
    let uart = uarte::Uarte::new(p.UARTE0, Irqs, p.P0_08, p.P0_06, ble::serial::uarte_config());

    let sd = Softdevice::enable(&ble::softdevice_config(MOUSE_DEVICE_NAME));

    let mut registration = Registration::new();
    let mut registry = SoftdeviceRegistry::new(sd);
    let session = unwrap!(Session::new(
        &mut registration,
        &mut registry,
        SoftdeviceLink::new(),
        &MOUSE_REPORT_MAP,
    ));
    unwrap!(DeviceInformation::new(MOUSE_PRODUCT_ID).register(&mut registry));
    let sd: &'static Softdevice = sd;

    static SESSION: StaticCell<SharedSession<Session>> = StaticCell::new();
    let session = SESSION.init(Mutex::new(RefCell::new(session)));

    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(serial_task(uart, session)));

    static SECURITY: StaticCell<PasskeyDisplay> = StaticCell::new();
    let security = SECURITY.init(PasskeyDisplay::new(CONSOLE.sender()));

    let adv_data = unwrap!(AdvertisingData::for_profile(Profile::Mouse));
    let server = HidServer::new(session);

    ble::advertise_and_serve(sd, &server, &adv_data, security).await
}
