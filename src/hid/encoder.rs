//! Report Encoder - owns the report map, the live report and the HID
//! Information / Protocol Mode values for one profile.
//!
//! Every update rebuilds the whole report, so a host reading the
//! characteristic never sees half of an old report and half of a new one.

use super::info::{HidInformation, ProtocolMode};
use super::keyboard::KEYBOARD_REPORT_MAP_LEN;
use super::mouse::{MOUSE_REPORT_MAP_LEN, WIDE_MOUSE_REPORT_MAP_LEN};
use super::report::{Buttons, Modifiers, Report, REPORT_SIZE};
use super::report_protocol::{DeltaField, ReportLayout};
use crate::error::Error;

/// Read-only copy of a profile's report map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportMap<const N: usize>([u8; N]);

impl<const N: usize> ReportMap<N> {
    /// Copy `data`, which must be exactly `N` bytes.
    pub fn new(data: &[u8]) -> Result<Self, Error> {
        <[u8; N]>::try_from(data)
            .map(Self)
            .map_err(|_| Error::InvalidLength {
                expected: N,
                actual: data.len(),
            })
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }
}

/// Result of a mouse report update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseUpdate {
    pub report: Report,
    /// At least one delta was saturated to fit the field.
    pub clamped: bool,
}

impl MouseUpdate {
    /// `Err(ClampedValue)` if a delta was saturated.
    pub fn status(&self) -> Result<(), Error> {
        if self.clamped {
            Err(Error::ClampedValue)
        } else {
            Ok(())
        }
    }
}

/// Encoder for one profile, parameterised by its report map length.
#[derive(Clone, Debug)]
pub struct ReportEncoder<const N: usize> {
    map: ReportMap<N>,
    layout: ReportLayout,
    report: Report,
    information: HidInformation,
    protocol_mode: ProtocolMode,
}

/// Encoder for the 76-byte keyboard report map.
pub type KeyboardEncoder = ReportEncoder<KEYBOARD_REPORT_MAP_LEN>;
/// Encoder for the 8-bit-delta mouse report map.
pub type MouseEncoder = ReportEncoder<MOUSE_REPORT_MAP_LEN>;
/// Encoder for the 16-bit-delta mouse report map.
pub type WideMouseEncoder = ReportEncoder<WIDE_MOUSE_REPORT_MAP_LEN>;

impl<const N: usize> ReportEncoder<N> {
    /// Build an encoder from report map bytes.
    ///
    /// Fails with `InvalidLength` if `report_map` is not `N` bytes or does
    /// not describe an 8-byte input report, and with `MalformedReportMap`
    /// if it has no keyboard/mouse application collection, declares
    /// Report IDs, or has X/Y fields other than 8 or 16 bits wide.
    pub fn new(report_map: &[u8]) -> Result<Self, Error> {
        let map = ReportMap::new(report_map)?;
        let layout = ReportLayout::parse(map.as_bytes()).ok_or(Error::MalformedReportMap)?;
        // The Report characteristic is registered with Report ID 0.
        if layout.has_report_ids {
            return Err(Error::MalformedReportMap);
        }
        if layout.delta.is_some_and(|field| !field.fits_field()) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Unsupported mouse delta field: {}", layout.delta);
            return Err(Error::MalformedReportMap);
        }
        if layout.input_len() != REPORT_SIZE {
            return Err(Error::InvalidLength {
                expected: REPORT_SIZE,
                actual: layout.input_len(),
            });
        }

        Ok(Self {
            map,
            layout,
            report: Report::empty(),
            information: HidInformation::default(),
            protocol_mode: ProtocolMode::Report,
        })
    }

    /// Replace the (zeroed) HID Information value. Only meaningful before
    /// the service is registered.
    pub fn with_information(mut self, information: HidInformation) -> Self {
        self.information = information;
        self
    }

    pub fn report_map(&self) -> &[u8; N] {
        self.map.as_bytes()
    }

    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    /// Current report contents.
    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn information(&self) -> HidInformation {
        self.information
    }

    pub fn protocol_mode(&self) -> ProtocolMode {
        self.protocol_mode
    }

    /// Apply a host protocol-mode selection. Only Report mode is
    /// supported; returns `false` (and keeps Report mode) for Boot.
    pub fn set_protocol_mode(&mut self, mode: ProtocolMode) -> bool {
        match mode {
            ProtocolMode::Report => {
                self.protocol_mode = mode;
                true
            }
            ProtocolMode::Boot => false,
        }
    }

    /// Build `[modifier][0][keycode][0; 5]`, replacing the previous report.
    pub fn update_keyboard_report(&mut self, modifier: Modifiers, keycode: u8) -> Report {
        let mut report = Report::empty();
        report.set_modifier(modifier);
        report.set_keycode(0, keycode);
        self.report = report;
        report
    }

    /// Build a mouse report in the field width of the active report map,
    /// replacing the previous report. Deltas outside the map's logical
    /// range are saturated.
    pub fn update_mouse_report(&mut self, dx: i16, dy: i16, buttons: Buttons) -> MouseUpdate {
        let field = self.layout.delta.unwrap_or(DeltaField::BOOT);
        let (dx, clamped_x) = field.clamp(dx);
        let (dy, clamped_y) = field.clamp(dy);

        let mut report = Report::empty();
        report.set_byte(0, buttons.bits());
        if field.bits == 16 {
            let [x_lo, x_hi] = dx.to_le_bytes();
            let [y_lo, y_hi] = dy.to_le_bytes();
            report.set_byte(1, x_lo);
            report.set_byte(2, x_hi);
            report.set_byte(3, y_lo);
            report.set_byte(4, y_hi);
        } else {
            // fits_field() keeps 8-bit logical ranges within i8
            report.set_byte(1, dx as i8 as u8);
            report.set_byte(2, dy as i8 as u8);
        }
        self.report = report;

        let clamped = clamped_x || clamped_y;
        #[cfg(feature = "defmt")]
        if clamped {
            defmt::warn!("Mouse delta saturated to ({}, {})", dx, dy);
        }

        MouseUpdate { report, clamped }
    }

    /// Host-initiated write into the low bytes of the report.
    pub fn write_report_prefix(&mut self, data: &[u8]) -> Result<(), Error> {
        self.report.overwrite_prefix(data)
    }
}
