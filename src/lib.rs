//! serial2blehid - serial console to BLE HID bridge.
//!
//! Bytes typed on a serial console become HID keyboard or mouse reports
//! sent as HID-over-GATT notifications.
//!
//! The portable logic (report encoding, input decoding, the HID service
//! adapter and the session drivers) builds on the host for tests:
//!
//! ```text
//! cargo test --lib
//! cargo test --test integration
//! ```
//!
//! The SoftDevice glue in [`ble`] and the `serial-keyboard` /
//! `serial-mouse` binaries need the `embedded` feature and an nRF52840
//! target.

#![cfg_attr(not(test), no_std)]

pub mod advertising;
pub mod config;
pub mod error;
pub mod hid;
pub mod input;
pub mod service;
pub mod session;

#[cfg(feature = "embedded")]
pub mod ble;

pub use error::{Error, TransportError};

// ═══════════════════════════════════════════════════════════════════════════
// Cross-module Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use crate::hid::keyboard::KEYBOARD_REPORT_MAP;
    use crate::hid::mouse::MOUSE_REPORT_MAP;
    use crate::hid::{Buttons, KeyboardEncoder, MouseEncoder};
    use crate::input::{translate, LineParser, Step};

    // ════════════════════════════════════════════════════════════════════════
    // Translator → Encoder
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn typed_capital_becomes_shifted_report() {
        let mut encoder = KeyboardEncoder::new(&KEYBOARD_REPORT_MAP).unwrap();
        let stroke = translate(b'H').unwrap();
        let report = encoder.update_keyboard_report(stroke.modifier, stroke.keycode);
        assert_eq!(report.as_bytes(), &[0x02, 0x00, 0x0B, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn enter_report() {
        let mut encoder = KeyboardEncoder::new(&KEYBOARD_REPORT_MAP).unwrap();
        let stroke = translate(b'\r').unwrap();
        let report = encoder.update_keyboard_report(stroke.modifier, stroke.keycode);
        assert_eq!(report.as_bytes(), &[0x00, 0x00, 0x28, 0, 0, 0, 0, 0]);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Line Parser → Encoder
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn parsed_line_becomes_mouse_report() {
        let mut parser = LineParser::<8>::new();
        let mut last = Step::Buffered;
        for &b in b"-5 20\r" {
            last = parser.push(b).unwrap();
        }
        assert_eq!(last, Step::Complete(-5, 20));
        let (x, y) = parser.take().unwrap();

        let mut encoder = MouseEncoder::new(&MOUSE_REPORT_MAP).unwrap();
        let update = encoder.update_mouse_report(x as i16, y as i16, Buttons::LEFT);
        assert_eq!(update.report.as_bytes(), &[0x01, 0xFB, 0x14, 0, 0, 0, 0, 0]);
    }
}
