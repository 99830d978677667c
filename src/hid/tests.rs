//! Unit tests for report encoding and report map parsing.
//!
//! These tests run on the host (not embedded) and verify the pure
//! logic of report layout, encoding and descriptor walking.

use super::encoder::{KeyboardEncoder, MouseEncoder, ReportEncoder, ReportMap, WideMouseEncoder};
use super::info::{HidFlags, HidInformation, ProtocolMode};
use super::keyboard::{usage, KEYBOARD_REPORT_MAP};
use super::mouse::{MOUSE_REPORT_MAP, WIDE_MOUSE_REPORT_MAP};
use super::report::{Buttons, Modifiers, Report};
use super::report_protocol::{DeltaField, ReportKind, ReportLayout};
use crate::error::Error;

// ═══════════════════════════════════════════════════════════════════════════
// Report Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn report_empty() {
    let report = Report::empty();
    assert!(report.is_empty());
    assert_eq!(report.modifier(), Modifiers::empty());
    assert_eq!(report.as_bytes(), &[0; 8]);
}

#[test]
fn report_keycode_slots_are_bounds_checked() {
    let mut report = Report::empty();
    assert!(report.set_keycode(5, 0x04));
    assert!(!report.set_keycode(6, 0x05));
    assert_eq!(report.keycode(5), Some(0x04));
    assert_eq!(report.keycode(6), None);
    assert_eq!(report.as_bytes(), &[0, 0, 0, 0, 0, 0, 0, 0x04]);
}

#[test]
fn report_set_byte_out_of_range() {
    let mut report = Report::empty();
    assert!(!report.set_byte(8, 0xFF));
    assert!(report.is_empty());
}

#[test]
fn report_overwrite_prefix_keeps_tail() {
    let mut report = Report::from_bytes([1, 2, 3, 4, 5, 6, 7, 8]);
    report.overwrite_prefix(&[0xAA, 0xBB]).unwrap();
    assert_eq!(report.as_bytes(), &[0xAA, 0xBB, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn report_overwrite_prefix_too_long() {
    let mut report = Report::empty();
    assert_eq!(
        report.overwrite_prefix(&[0; 9]),
        Err(Error::InvalidLength {
            expected: 8,
            actual: 9
        })
    );
    assert!(report.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// HID Information / Protocol Mode Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn hid_information_zeroed_layout() {
    assert_eq!(HidInformation::default().to_bytes(), [0x00, 0x00, 0x00, 0x00]);
}

#[test]
fn hid_information_little_endian_layout() {
    let info = HidInformation::new(0x0111, 0x21, HidFlags::REMOTE_WAKE | HidFlags::NORMALLY_CONNECTABLE);
    assert_eq!(info.to_bytes(), [0x11, 0x01, 0x21, 0x03]);
}

#[test]
fn protocol_mode_from_byte() {
    assert_eq!(ProtocolMode::try_from(0), Ok(ProtocolMode::Boot));
    assert_eq!(ProtocolMode::try_from(1), Ok(ProtocolMode::Report));
    assert_eq!(ProtocolMode::try_from(2), Err(2));
}

// ═══════════════════════════════════════════════════════════════════════════
// Report Map Parsing Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn parse_keyboard_report_map() {
    let layout = ReportLayout::parse(&KEYBOARD_REPORT_MAP).unwrap();
    assert_eq!(layout.kind, ReportKind::Keyboard);
    assert_eq!(layout.input_len(), 8);
    assert_eq!(layout.delta, None);
    assert!(!layout.has_report_ids);
}

#[test]
fn parse_mouse_report_map() {
    let layout = ReportLayout::parse(&MOUSE_REPORT_MAP).unwrap();
    assert_eq!(layout.kind, ReportKind::Mouse);
    assert_eq!(layout.input_bits, 64);
    assert_eq!(layout.delta, Some(DeltaField::BOOT));
}

#[test]
fn parse_wide_mouse_report_map() {
    let layout = ReportLayout::parse(&WIDE_MOUSE_REPORT_MAP).unwrap();
    assert_eq!(layout.kind, ReportKind::Mouse);
    assert_eq!(layout.input_len(), 8);
    assert_eq!(
        layout.delta,
        Some(DeltaField {
            bits: 16,
            logical_min: -32767,
            logical_max: 32767,
        })
    );
}

#[test]
fn parse_rejects_truncated_item() {
    // Logical Maximum with a 2-byte payload cut short.
    let data = [0x05, 0x01, 0x09, 0x06, 0xA1, 0x01, 0x26, 0xFF];
    assert!(ReportLayout::parse(&data).is_none());
}

#[test]
fn parse_rejects_unknown_application() {
    // Consumer Control application collection.
    let data = [0x05, 0x0C, 0x09, 0x01, 0xA1, 0x01, 0xC0];
    assert!(ReportLayout::parse(&data).is_none());
}

#[test]
fn parse_detects_report_ids() {
    let data = [0x05, 0x01, 0x09, 0x02, 0xA1, 0x01, 0x85, 0x02, 0xC0];
    let layout = ReportLayout::parse(&data).unwrap();
    assert!(layout.has_report_ids);
    assert_eq!(layout.input_bits, 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Encoder Construction Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn report_map_wrong_length_rejected() {
    assert_eq!(
        ReportMap::<76>::new(&KEYBOARD_REPORT_MAP[..75]),
        Err(Error::InvalidLength {
            expected: 76,
            actual: 75
        })
    );
}

#[test]
fn encoder_starts_zeroed_in_report_mode() {
    let encoder = KeyboardEncoder::new(&KEYBOARD_REPORT_MAP).unwrap();
    assert_eq!(encoder.report_map(), &KEYBOARD_REPORT_MAP);
    assert!(encoder.report().is_empty());
    assert_eq!(encoder.information().to_bytes(), [0; 4]);
    assert_eq!(encoder.protocol_mode(), ProtocolMode::Report);
}

#[test]
fn encoder_rejects_map_of_other_profile() {
    let err = KeyboardEncoder::new(&MOUSE_REPORT_MAP).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidLength {
            expected: 76,
            actual: 56
        }
    );
}

#[test]
fn encoder_rejects_unrecognised_map() {
    let mut map = KEYBOARD_REPORT_MAP;
    map[3] = 0x05; // Usage (Game Pad) instead of Usage (Keyboard)
    assert_eq!(KeyboardEncoder::new(&map).unwrap_err(), Error::MalformedReportMap);
}

#[test]
fn encoder_rejects_wrong_input_report_size() {
    let mut map = KEYBOARD_REPORT_MAP;
    // Key array Report Count 6 -> 5: the input report shrinks to 7 bytes.
    assert_eq!(&map[46..48], &[0x95, 0x06]);
    map[47] = 0x05;
    assert_eq!(
        KeyboardEncoder::new(&map).unwrap_err(),
        Error::InvalidLength {
            expected: 8,
            actual: 7
        }
    );
}

#[test]
fn encoder_rejects_12_bit_mouse_fields() {
    let mut map = WIDE_MOUSE_REPORT_MAP;
    // Logical -2047..2047, Report Size 12.
    assert_eq!(&map[38..46], &[0x16, 0x01, 0x80, 0x26, 0xFF, 0x7F, 0x75, 0x10]);
    map[40] = 0xF8;
    map[43] = 0x07;
    map[45] = 0x0C;

    let layout = ReportLayout::parse(&map).unwrap();
    assert_eq!(
        layout.delta,
        Some(DeltaField {
            bits: 12,
            logical_min: -2047,
            logical_max: 2047,
        })
    );
    assert_eq!(WideMouseEncoder::new(&map).unwrap_err(), Error::MalformedReportMap);
}

#[test]
fn encoder_rejects_range_wider_than_field() {
    let mut map = WIDE_MOUSE_REPORT_MAP;
    // Report Size 16 -> 8 while keeping the -32767..32767 range.
    map[45] = 0x08;
    assert_eq!(WideMouseEncoder::new(&map).unwrap_err(), Error::MalformedReportMap);
}

#[test]
fn delta_field_widths() {
    assert!(DeltaField::BOOT.fits_field());
    assert!(ReportLayout::parse(&WIDE_MOUSE_REPORT_MAP)
        .and_then(|layout| layout.delta)
        .is_some_and(|field| field.fits_field()));
    let inverted = DeltaField {
        bits: 8,
        logical_min: 10,
        logical_max: -10,
    };
    assert!(!inverted.fits_field());
}

#[test]
fn encoder_rejects_report_ids() {
    // Report ID (1) right after Collection (Application).
    assert_eq!(&KEYBOARD_REPORT_MAP[4..6], &[0xA1, 0x01]);
    let mut map = [0u8; 78];
    map[..6].copy_from_slice(&KEYBOARD_REPORT_MAP[..6]);
    map[6..8].copy_from_slice(&[0x85, 0x01]);
    map[8..].copy_from_slice(&KEYBOARD_REPORT_MAP[6..]);

    let layout = ReportLayout::parse(&map).unwrap();
    assert!(layout.has_report_ids);
    assert_eq!(layout.input_len(), 8);
    assert_eq!(
        ReportEncoder::<78>::new(&map).unwrap_err(),
        Error::MalformedReportMap
    );
}

#[test]
fn encoder_with_information() {
    let info = HidInformation::new(0x0111, 0x00, HidFlags::NORMALLY_CONNECTABLE);
    let encoder = KeyboardEncoder::new(&KEYBOARD_REPORT_MAP)
        .unwrap()
        .with_information(info);
    assert_eq!(encoder.information(), info);
    assert_eq!(encoder.information().to_bytes(), [0x11, 0x01, 0x00, 0x02]);
}

#[test]
fn encoder_boot_mode_is_refused() {
    let mut encoder = KeyboardEncoder::new(&KEYBOARD_REPORT_MAP).unwrap();
    assert!(!encoder.set_protocol_mode(ProtocolMode::Boot));
    assert_eq!(encoder.protocol_mode(), ProtocolMode::Report);
    assert!(encoder.set_protocol_mode(ProtocolMode::Report));
}

// ═══════════════════════════════════════════════════════════════════════════
// Keyboard Encoding Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn keyboard_report_layout() {
    let mut encoder = KeyboardEncoder::new(&KEYBOARD_REPORT_MAP).unwrap();
    let report = encoder.update_keyboard_report(Modifiers::LEFT_SHIFT, usage::A);
    assert_eq!(report.as_bytes(), &[0x02, 0x00, 0x04, 0, 0, 0, 0, 0]);
    assert_eq!(encoder.report(), &report);
}

#[test]
fn keyboard_report_is_repeatable() {
    let mut encoder = KeyboardEncoder::new(&KEYBOARD_REPORT_MAP).unwrap();
    let first = encoder.update_keyboard_report(Modifiers::empty(), usage::Z);
    let second = encoder.update_keyboard_report(Modifiers::empty(), usage::Z);
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn keyboard_report_fully_overwrites() {
    let mut encoder = KeyboardEncoder::new(&KEYBOARD_REPORT_MAP).unwrap();
    encoder.write_report_prefix(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap();
    let report = encoder.update_keyboard_report(Modifiers::empty(), 0);
    assert!(report.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Mouse Encoding Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn mouse_report_8_bit_layout() {
    let mut encoder = MouseEncoder::new(&MOUSE_REPORT_MAP).unwrap();
    let update = encoder.update_mouse_report(10, -5, Buttons::LEFT);
    assert!(!update.clamped);
    assert_eq!(update.report.as_bytes(), &[0x01, 0x0A, 0xFB, 0, 0, 0, 0, 0]);
    assert_eq!(update.status(), Ok(()));
}

#[test]
fn mouse_report_8_bit_clamps() {
    let mut encoder = MouseEncoder::new(&MOUSE_REPORT_MAP).unwrap();
    let update = encoder.update_mouse_report(300, -300, Buttons::empty());
    assert!(update.clamped);
    assert_eq!(update.report.as_bytes(), &[0x00, 0x7F, 0x81, 0, 0, 0, 0, 0]);
    assert_eq!(update.status(), Err(Error::ClampedValue));
}

#[test]
fn mouse_report_16_bit_layout() {
    let mut encoder = WideMouseEncoder::new(&WIDE_MOUSE_REPORT_MAP).unwrap();
    let update = encoder.update_mouse_report(300, -2, Buttons::RIGHT);
    assert!(!update.clamped);
    assert_eq!(update.report.as_bytes(), &[0x02, 0x2C, 0x01, 0xFE, 0xFF, 0, 0, 0]);
}

#[test]
fn mouse_report_16_bit_clamps_minimum() {
    let mut encoder = WideMouseEncoder::new(&WIDE_MOUSE_REPORT_MAP).unwrap();
    let update = encoder.update_mouse_report(i16::MIN, 0, Buttons::empty());
    assert!(update.clamped);
    assert_eq!(&update.report.as_bytes()[1..3], &(-32767i16).to_le_bytes());
}

#[test]
fn keyboard_encoder_mouse_update_uses_boot_width() {
    let mut encoder = KeyboardEncoder::new(&KEYBOARD_REPORT_MAP).unwrap();
    let update = encoder.update_mouse_report(-128, 1, Buttons::MIDDLE);
    assert!(update.clamped);
    assert_eq!(update.report.as_bytes(), &[0x04, 0x81, 0x01, 0, 0, 0, 0, 0]);
}
