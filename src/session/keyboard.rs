//! Keyboard session: one serial byte types one key.

use super::{Feedback, Profile, SerialInput};
use crate::error::Error;
use crate::hid::keyboard::{KEYBOARD_REPORT_MAP, KEYBOARD_REPORT_MAP_LEN};
use crate::hid::{KeyboardEncoder, Modifiers, ReportKind};
use crate::input::{translate, KeyStroke};
use crate::service::{AttributeRegistry, AttributeWriteHandler, HidService, Registration, Transport};

pub struct KeyboardService<T> {
    hid: HidService<T, KEYBOARD_REPORT_MAP_LEN>,
}

impl<T: Transport> KeyboardService<T> {
    pub fn new<R: AttributeRegistry>(
        registration: &mut Registration,
        registry: &mut R,
        transport: T,
    ) -> Result<Self, Error> {
        let encoder = KeyboardEncoder::new(&KEYBOARD_REPORT_MAP)?;
        if encoder.layout().kind != ReportKind::Keyboard {
            return Err(Error::MalformedReportMap);
        }
        Ok(Self {
            hid: HidService::new(registration, registry, transport, encoder)?,
        })
    }

    pub fn is_connected(&self) -> bool {
        self.hid.is_connected()
    }

    /// Type `byte`: a press report then an all-zero release report.
    ///
    /// Nothing is touched while disconnected. Bytes with no key are
    /// dropped with `Unsupported`.
    pub fn submit(&mut self, byte: u8) -> Result<(), Error> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        let stroke = translate(byte)?;
        self.tap(stroke)
    }

    /// Alias of [`submit`](Self::submit).
    pub fn putc(&mut self, byte: u8) -> Result<(), Error> {
        self.submit(byte)
    }

    /// Press and release one key.
    pub fn tap(&mut self, stroke: KeyStroke) -> Result<(), Error> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }

        self.hid
            .encoder_mut()
            .update_keyboard_report(stroke.modifier, stroke.keycode);
        let press = self.hid.notify();

        self.hid
            .encoder_mut()
            .update_keyboard_report(Modifiers::empty(), 0);
        let release = self.hid.notify();

        press.and(release).map_err(Error::from)
    }

    pub fn service(&self) -> &HidService<T, KEYBOARD_REPORT_MAP_LEN> {
        &self.hid
    }

    pub fn service_mut(&mut self) -> &mut HidService<T, KEYBOARD_REPORT_MAP_LEN> {
        &mut self.hid
    }
}

impl<T: Transport> SerialInput for KeyboardService<T> {
    const PROFILE: Profile = Profile::Keyboard;

    fn on_serial_byte(&mut self, byte: u8) -> Result<Feedback, Error> {
        self.submit(byte).map(|()| Feedback::silent())
    }
}

impl<T> AttributeWriteHandler for KeyboardService<T> {
    fn on_attribute_written(&mut self, handle: u16, data: &[u8]) {
        self.hid.on_attribute_written(handle, data);
    }
}
