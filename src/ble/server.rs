//! GATT server glue: routes host writes into the shared session.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use nrf_softdevice::ble::gatt_server::{self, WriteOp};
use nrf_softdevice::ble::Connection;

use super::SoftdeviceLink;
use crate::service::AttributeWriteHandler;
use crate::session::{KeyboardService, MouseService, SerialInput};

/// Session shared by the serial task and the GATT write callback.
pub type SharedSession<S> = Mutex<CriticalSectionRawMutex, RefCell<S>>;

/// A session bound to a SoftDevice connection.
pub trait LinkedSession: SerialInput + AttributeWriteHandler {
    fn link_mut(&mut self) -> &mut SoftdeviceLink;
}

impl LinkedSession for KeyboardService<SoftdeviceLink> {
    fn link_mut(&mut self) -> &mut SoftdeviceLink {
        self.service_mut().transport_mut()
    }
}

impl<const N: usize, const CAP: usize> LinkedSession for MouseService<SoftdeviceLink, N, CAP> {
    fn link_mut(&mut self) -> &mut SoftdeviceLink {
        self.service_mut().transport_mut()
    }
}

pub struct HidServer<S: 'static> {
    session: &'static SharedSession<S>,
}

impl<S: LinkedSession> HidServer<S> {
    pub fn new(session: &'static SharedSession<S>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &'static SharedSession<S> {
        self.session
    }
}

impl<S: LinkedSession> gatt_server::Server for HidServer<S> {
    type Event = ();

    fn on_write(
        &self,
        _conn: &Connection,
        handle: u16,
        _op: WriteOp,
        _offset: usize,
        data: &[u8],
    ) -> Option<Self::Event> {
        self.session
            .lock(|session| session.borrow_mut().on_attribute_written(handle, data));
        None
    }
}
