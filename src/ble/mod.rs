//! Bluetooth Low Energy subsystem (embedded only).
//!
//! Drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Registry** - adds the HID service to the attribute table.
//! 2. **Link** - pushes report updates over the current connection.
//! 3. **Server** - forwards host writes to the shared session.
//! 4. **Security** - display-only passkey pairing with RAM bonds.
//! 5. **Serial** - the console task that feeds the session.
//!
//! [`advertise_and_serve`] ties them together: advertise, accept one
//! host, serve GATT until it leaves, then advertise again.

pub mod link;
pub mod registry;
pub mod security;
pub mod serial;
pub mod server;

pub use link::SoftdeviceLink;
pub use registry::SoftdeviceRegistry;
pub use security::{ConsoleSender, PasskeyDisplay};
pub use serial::ConsoleReceiver;
pub use server::{HidServer, LinkedSession, SharedSession};

use defmt::{info, warn};
use embassy_time::{Duration, Timer};
use nrf_softdevice::ble::security::SecurityHandler;
use nrf_softdevice::ble::{gatt_server, peripheral};
use nrf_softdevice::{raw, Softdevice};

use crate::advertising::AdvertisingData;
use crate::config::{BLE_ADV_INTERVAL, BLE_ADV_RETRY_MS, BLE_ATTR_TAB_SIZE, BLE_ATT_MTU};

/// SoftDevice configuration for a single-connection peripheral named
/// `device_name`.
pub fn softdevice_config(device_name: &'static str) -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t {
            att_mtu: BLE_ATT_MTU,
        }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: BLE_ATTR_TAB_SIZE,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: device_name.as_ptr() as _,
            current_len: device_name.len() as u16,
            max_len: device_name.len() as u16,
            // SAFETY: all-zero is "no write access", a valid security mode.
            write_perm: unsafe { core::mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Advertise, serve one host at a time, and re-advertise after every
/// disconnection. Never returns.
pub async fn advertise_and_serve<S: LinkedSession>(
    sd: &'static Softdevice,
    server: &HidServer<S>,
    adv_data: &AdvertisingData,
    security: &'static dyn SecurityHandler,
) -> ! {
    let config = peripheral::Config {
        interval: BLE_ADV_INTERVAL,
        ..Default::default()
    };

    loop {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: adv_data.get_slice(),
            scan_data: &[],
        };

        info!("Advertising...");
        let conn = match peripheral::advertise_pairable(sd, adv, &config, security).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Advertising failed: {:?}", e);
                Timer::after(Duration::from_millis(BLE_ADV_RETRY_MS)).await;
                continue;
            }
        };

        info!("Host connected");
        server
            .session()
            .lock(|session| session.borrow_mut().link_mut().attach(sd, conn.clone()));

        let reason = gatt_server::run(&conn, server, |_| {}).await;
        info!("Host disconnected: {:?}", reason);

        server.session().lock(|session| {
            let mut session = session.borrow_mut();
            session.link_mut().detach();
            session.on_disconnect();
        });
    }
}
