//! HID Report Protocol descriptor walker.
//!
//! Reads a Report Map to learn the shape of the report-protocol input
//! report it describes, so the encoder can check the map against the
//! fixed 8-byte Report characteristic and size the mouse delta fields:
//! - Application collection usage (keyboard or mouse)
//! - Total Input bits (the input report length)
//! - X/Y field width and signed logical range
//!
//! ## HID Report Descriptor Structure
//!
//! A Report Descriptor is a sequence of items that describe the
//! format of HID reports. Key items:
//! - Usage Page: Category of usages (keyboard, mouse, etc.)
//! - Usage: Specific function within a page
//! - Report ID: Identifies which report follows (if multiple)
//! - Report Size: Bits per field
//! - Report Count: Number of fields
//! - Logical Minimum/Maximum: Signed value range of a field
//! - Input/Output/Feature: Direction of the report
//!
//! ## Limitations
//!
//! This implementation handles common cases but not the full HID descriptor grammar:
//! - Nested collections are flattened
//! - Push/Pop state is not supported
//! - Long items and delimiters are skipped

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportKind {
    Keyboard,
    Mouse,
}

/// Usage page codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsagePage {
    /// Generic Desktop (mouse, keyboard, joystick).
    GenericDesktop,
    /// Keyboard/Keypad.
    Keyboard,
    /// LEDs.
    Led,
    /// Button.
    Button,
    /// Unknown/unsupported.
    Unknown(u16),
}

impl From<u16> for UsagePage {
    fn from(code: u16) -> Self {
        match code {
            0x01 => UsagePage::GenericDesktop,
            0x07 => UsagePage::Keyboard,
            0x08 => UsagePage::Led,
            0x09 => UsagePage::Button,
            other => UsagePage::Unknown(other),
        }
    }
}

/// Generic Desktop usage codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DesktopUsage {
    Pointer,
    Mouse,
    Keyboard,
    X,
    Y,
    Wheel,
    Unknown(u16),
}

impl From<u16> for DesktopUsage {
    fn from(code: u16) -> Self {
        match code {
            0x01 => DesktopUsage::Pointer,
            0x02 => DesktopUsage::Mouse,
            0x06 => DesktopUsage::Keyboard,
            0x30 => DesktopUsage::X,
            0x31 => DesktopUsage::Y,
            0x38 => DesktopUsage::Wheel,
            other => DesktopUsage::Unknown(other),
        }
    }
}

/// Width and signed range of the X/Y delta fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeltaField {
    /// Report Size of each axis, in bits.
    pub bits: u8,
    pub logical_min: i32,
    pub logical_max: i32,
}

impl DeltaField {
    /// Boot-protocol mouse axis: 8 bits, -127..127.
    pub const BOOT: DeltaField = DeltaField {
        bits: 8,
        logical_min: -127,
        logical_max: 127,
    };

    /// Is this an 8- or 16-bit field whose logical range fits its width?
    pub fn fits_field(&self) -> bool {
        let (min, max) = match self.bits {
            8 => (i32::from(i8::MIN), i32::from(i8::MAX)),
            16 => (i32::from(i16::MIN), i32::from(i16::MAX)),
            _ => return false,
        };
        min <= self.logical_min && self.logical_min <= self.logical_max && self.logical_max <= max
    }

    /// Saturate `value` into the logical range. The flag is `true` if the
    /// value had to be changed.
    pub fn clamp(&self, value: i16) -> (i16, bool) {
        let v = i32::from(value);
        let clamped = v.clamp(self.logical_min, self.logical_max);
        // fits_field() is checked before a field is used
        (clamped as i16, clamped != v)
    }
}

/// Input report layout described by a report map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportLayout {
    /// Usage of the first Application collection.
    pub kind: ReportKind,
    /// Sum of all Input item bits.
    pub input_bits: u16,
    /// X/Y field description, for mouse maps.
    pub delta: Option<DeltaField>,
    /// Does the map declare any Report ID?
    pub has_report_ids: bool,
}

impl ReportLayout {
    /// Input report length in whole bytes.
    pub fn input_len(&self) -> usize {
        usize::from(self.input_bits).div_ceil(8)
    }

    /// Parse a HID Report Descriptor.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let mut kind: Option<ReportKind> = None;
        let mut input_bits: u16 = 0;
        let mut delta: Option<DeltaField> = None;
        let mut has_report_ids = false;

        // Parser state.
        let mut usage_page: UsagePage = UsagePage::Unknown(0);
        let mut usage: u16 = 0;
        let mut has_axis_usage = false;
        let mut report_size: u16 = 0;
        let mut report_count: u16 = 0;
        let mut logical_min: i32 = 0;
        let mut logical_max: i32 = 0;

        let mut i = 0;
        while i < data.len() {
            let prefix = data[i];
            let tag = (prefix >> 4) & 0x0F;
            let item_type = (prefix >> 2) & 0x03;
            let size = match prefix & 0x03 {
                0 => 0,
                1 => 1,
                2 => 2,
                _ => 4,
            };

            if i + 1 + size > data.len() {
                #[cfg(feature = "defmt")]
                defmt::debug!("HID descriptor: truncated item at offset {}", i);
                return None;
            }

            let value: u32 = match size {
                0 => 0,
                1 => data[i + 1] as u32,
                2 => u16::from_le_bytes([data[i + 1], data[i + 2]]) as u32,
                _ => u32::from_le_bytes([data[i + 1], data[i + 2], data[i + 3], data[i + 4]]),
            };
            // Logical Minimum/Maximum are signed.
            let signed: i32 = match size {
                0 => 0,
                1 => data[i + 1] as i8 as i32,
                2 => i16::from_le_bytes([data[i + 1], data[i + 2]]) as i32,
                _ => value as i32,
            };

            match item_type {
                // Main items
                0 => {
                    match tag {
                        // Input
                        0x08 => {
                            input_bits =
                                input_bits.saturating_add(report_size.saturating_mul(report_count));

                            let is_constant = (value & 0x01) != 0;
                            if !is_constant
                                && usage_page == UsagePage::GenericDesktop
                                && has_axis_usage
                                && delta.is_none()
                            {
                                delta = Some(DeltaField {
                                    bits: report_size as u8,
                                    logical_min,
                                    logical_max,
                                });
                            }
                        }
                        // Collection
                        0x0A => {
                            // Application collection
                            if value == 0x01 && kind.is_none() {
                                kind = match (usage_page, DesktopUsage::from(usage)) {
                                    (UsagePage::GenericDesktop, DesktopUsage::Keyboard) => {
                                        Some(ReportKind::Keyboard)
                                    }
                                    (UsagePage::GenericDesktop, DesktopUsage::Mouse) => {
                                        Some(ReportKind::Mouse)
                                    }
                                    _ => None,
                                };
                            }
                        }
                        // Output, Feature, End Collection
                        _ => {}
                    }
                    // Local items only apply to the next main item.
                    usage = 0;
                    has_axis_usage = false;
                }
                // Global items
                1 => {
                    match tag {
                        // Usage Page
                        0x00 => usage_page = UsagePage::from(value as u16),
                        // Logical Minimum
                        0x01 => logical_min = signed,
                        // Logical Maximum
                        0x02 => logical_max = signed,
                        // Report Size
                        0x07 => report_size = value as u16,
                        // Report ID
                        0x08 => has_report_ids = true,
                        // Report Count
                        0x09 => report_count = value as u16,
                        _ => {}
                    }
                }
                // Local items
                2 => {
                    if tag == 0x00 {
                        usage = value as u16;
                        if usage_page == UsagePage::GenericDesktop
                            && matches!(DesktopUsage::from(usage), DesktopUsage::X | DesktopUsage::Y)
                        {
                            has_axis_usage = true;
                        }
                    }
                }
                _ => {}
            }

            i += 1 + size;
        }

        match kind {
            Some(kind) => Some(ReportLayout {
                kind,
                input_bits,
                delta,
                has_report_ids,
            }),
            None => {
                #[cfg(feature = "defmt")]
                defmt::debug!("HID descriptor: no keyboard or mouse application collection");
                None
            }
        }
    }
}
