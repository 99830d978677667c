//! [`Transport`] over a live SoftDevice connection.

use defmt::debug;
use nrf_softdevice::ble::gatt_server::{self, NotifyValueError};
use nrf_softdevice::ble::Connection;
use nrf_softdevice::Softdevice;

use crate::error::TransportError;
use crate::service::Transport;

/// The current host connection, if any.
pub struct SoftdeviceLink {
    link: Option<(&'static Softdevice, Connection)>,
}

impl Default for SoftdeviceLink {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftdeviceLink {
    pub const fn new() -> Self {
        Self { link: None }
    }

    pub fn attach(&mut self, sd: &'static Softdevice, conn: Connection) {
        self.link = Some((sd, conn));
    }

    pub fn detach(&mut self) {
        self.link = None;
    }
}

impl Transport for SoftdeviceLink {
    fn update_characteristic(&mut self, handle: u16, value: &[u8]) -> Result<(), TransportError> {
        let Some((sd, conn)) = &self.link else {
            return Err(TransportError::NotifyFailed);
        };

        // Keep the stored value current for reads, then notify subscribers.
        gatt_server::set_value(sd, handle, value).map_err(|e| {
            debug!("set_value failed: {:?}", e);
            TransportError::NotifyFailed
        })?;

        gatt_server::notify_value(conn, handle, value).map_err(|e| {
            debug!("notify_value failed: {:?}", e);
            match e {
                NotifyValueError::Raw(raw) => TransportError::Raw(raw as u32),
                _ => TransportError::NotifyFailed,
            }
        })
    }

    fn is_link_connected(&self) -> bool {
        self.link
            .as_ref()
            .is_some_and(|(_, conn)| conn.handle().is_some())
    }
}
