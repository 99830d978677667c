//! Small fixed-layout HIDS characteristic values: HID Information,
//! Protocol Mode and Control Point.

/// HID Information size in bytes.
pub const HID_INFORMATION_SIZE: usize = 4;

bitflags::bitflags! {
    /// HID Information flags byte.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct HidFlags: u8 {
        const REMOTE_WAKE = 1 << 0;
        const NORMALLY_CONNECTABLE = 1 << 1;
    }
}

/// HID Information characteristic value (HIDS 1.0, section 2.10).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct HidInformation {
    /// HID class specification release number (BCD).
    pub bcd_hid: u16,
    /// Hardware country code; 0 = not localized.
    pub country_code: u8,
    pub flags: HidFlags,
}

impl HidInformation {
    pub const fn new(bcd_hid: u16, country_code: u8, flags: HidFlags) -> Self {
        Self {
            bcd_hid,
            country_code,
            flags,
        }
    }

    /// Encode as `[bcdHID lo][bcdHID hi][country][flags]`.
    pub fn to_bytes(&self) -> [u8; HID_INFORMATION_SIZE] {
        let [lo, hi] = self.bcd_hid.to_le_bytes();
        [lo, hi, self.country_code, self.flags.bits()]
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for HidInformation {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "HidInformation {{ bcd_hid: {=u16:#06x}, country_code: {=u8}, flags: {=u8:#04x} }}",
            self.bcd_hid,
            self.country_code,
            self.flags.bits()
        )
    }
}

/// Protocol Mode characteristic value (HIDS 1.0, section 2.4).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ProtocolMode {
    Boot = 0,
    #[default]
    Report = 1,
}

impl TryFrom<u8> for ProtocolMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ProtocolMode::Boot),
            1 => Ok(ProtocolMode::Report),
            other => Err(other),
        }
    }
}

/// HID Control Point value last written by the host (HIDS 1.0, section 2.11).
///
/// Stored verbatim; nothing acts on it.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlPoint(pub u8);

impl ControlPoint {
    pub const SUSPEND: u8 = 0x00;
    pub const EXIT_SUSPEND: u8 = 0x01;
}
