//! Display-only pairing: the passkey goes to the serial console.
//!
//! Bonds are kept in RAM only, so a reset means re-pairing.

use core::cell::RefCell;

use defmt::{info, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use heapless::Vec;
use nrf_softdevice::ble::security::{IoCapabilities, SecurityHandler};
use nrf_softdevice::ble::{Connection, EncryptionInfo, IdentityKey, MasterId, SecurityMode};

use crate::config::{CONSOLE_EVENT_DEPTH, MAX_BONDS};
use crate::session::ConsoleEvent;

pub type ConsoleSender = Sender<'static, CriticalSectionRawMutex, ConsoleEvent, CONSOLE_EVENT_DEPTH>;

struct PeerBond {
    master_id: MasterId,
    key: EncryptionInfo,
    peer_id: IdentityKey,
}

pub struct PasskeyDisplay {
    console: ConsoleSender,
    peers: RefCell<Vec<PeerBond, MAX_BONDS>>,
}

impl PasskeyDisplay {
    pub fn new(console: ConsoleSender) -> Self {
        Self {
            console,
            peers: RefCell::new(Vec::new()),
        }
    }

    fn post(&self, event: ConsoleEvent) {
        if self.console.try_send(event).is_err() {
            warn!("Console queue full, dropped {}", event);
        }
    }
}

impl SecurityHandler for PasskeyDisplay {
    fn io_capabilities(&self) -> IoCapabilities {
        IoCapabilities::DisplayOnly
    }

    fn can_bond(&self, _conn: &Connection) -> bool {
        true
    }

    fn display_passkey(&self, passkey: &[u8; 6]) {
        info!("Passkey: {:a}", passkey);
        self.post(ConsoleEvent::Passkey(*passkey));
    }

    fn on_bonded(
        &self,
        _conn: &Connection,
        master_id: MasterId,
        key: EncryptionInfo,
        peer_id: IdentityKey,
    ) {
        let mut peers = self.peers.borrow_mut();
        if let Some(existing) = peers.iter_mut().find(|p| p.master_id == master_id) {
            existing.key = key;
            existing.peer_id = peer_id;
            return;
        }

        if peers.is_full() {
            peers.remove(0);
        }

        let _ = peers.push(PeerBond {
            master_id,
            key,
            peer_id,
        });
    }

    fn get_key(&self, _conn: &Connection, master_id: MasterId) -> Option<EncryptionInfo> {
        self.peers
            .borrow()
            .iter()
            .find_map(|p| (p.master_id == master_id).then_some(p.key))
    }

    fn get_peripheral_key(&self, conn: &Connection) -> Option<(MasterId, EncryptionInfo)> {
        self.peers.borrow().iter().find_map(|p| {
            p.peer_id
                .is_match(conn.peer_address())
                .then_some((p.master_id, p.key))
        })
    }

    fn on_security_update(&self, _conn: &Connection, mode: SecurityMode) {
        info!("BLE security mode updated: {}", mode);
        let secured = !matches!(mode, SecurityMode::NoAccess | SecurityMode::Open);
        self.post(ConsoleEvent::Security(secured));
    }
}
