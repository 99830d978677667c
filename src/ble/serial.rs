//! Serial console task body: UARTE bytes in, session feedback out.

use core::fmt;

use defmt::{debug, info, warn};
use embassy_futures::select::{select, Either};
use embassy_nrf::uarte::{self, Uarte, UarteRx, UarteTx};
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};
use embassy_sync::channel::Receiver;
use embassy_sync::mutex::Mutex;

use super::SharedSession;
use crate::config::{CONSOLE_EVENT_DEPTH, SERIAL_BAUD};
use crate::error::Error;
use crate::session::{render_event, render_outcome, ConsoleEvent, ConsoleLine, SerialInput};

pub type ConsoleReceiver =
    Receiver<'static, CriticalSectionRawMutex, ConsoleEvent, CONSOLE_EVENT_DEPTH>;

/// 8N1 at [`SERIAL_BAUD`].
pub fn uarte_config() -> uarte::Config {
    let mut config = uarte::Config::default();
    config.parity = uarte::Parity::EXCLUDED;
    config.baudrate = uarte::Baudrate::BAUD115200;
    config
}

/// Feed every received byte to the session and write back whatever it
/// (or the BLE stack) wants shown.
///
/// Input and console events run as separate futures sharing the TX half,
/// so a pending RX read is never cancelled by an event.
pub async fn run<T: uarte::Instance, S: SerialInput>(
    uart: Uarte<'static, T>,
    session: &'static SharedSession<S>,
    console: ConsoleReceiver,
) -> ! {
    let (mut tx, rx) = uart.split();

    info!("Serial console ready ({} baud)", SERIAL_BAUD);
    if let Err(e) = tx.write(b"START\r\n").await {
        warn!("UART write error: {:?}", e);
    }

    let tx = Mutex::new(tx);
    match select(pump_input(rx, &tx, session), pump_events(&tx, console)).await {
        Either::First(never) | Either::Second(never) => never,
    }
}

type SharedTx<T> = Mutex<NoopRawMutex, UarteTx<'static, T>>;

async fn pump_input<T: uarte::Instance, S: SerialInput>(
    mut rx: UarteRx<'static, T>,
    tx: &SharedTx<T>,
    session: &'static SharedSession<S>,
) -> ! {
    let mut byte = [0u8; 1];
    loop {
        if let Err(e) = rx.read(&mut byte).await {
            warn!("UART read error: {:?}", e);
            continue;
        }

        let outcome = session.lock(|s| s.borrow_mut().on_serial_byte(byte[0]));
        match outcome {
            Err(Error::NotConnected) | Ok(_) => {}
            Err(e) => debug!("Serial byte {=u8:#04x} dropped: {}", byte[0], e),
        }

        let mut line = ConsoleLine::new();
        let rendered = render_outcome(&mut line, S::PROFILE, &outcome);
        write_line(tx, &line, rendered).await;
    }
}

async fn pump_events<T: uarte::Instance>(tx: &SharedTx<T>, console: ConsoleReceiver) -> ! {
    loop {
        let event = console.receive().await;
        let mut line = ConsoleLine::new();
        let rendered = render_event(&mut line, &event);
        write_line(tx, &line, rendered).await;
    }
}

async fn write_line<T: uarte::Instance>(tx: &SharedTx<T>, line: &ConsoleLine, rendered: fmt::Result) {
    if rendered.is_err() {
        warn!("Console line truncated");
    }
    if line.is_empty() {
        return;
    }
    if let Err(e) = tx.lock().await.write(line.as_bytes()).await {
        warn!("UART write error: {:?}", e);
    }
}
