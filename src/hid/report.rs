//! The 8-byte HID input report shared by both profiles.
//!
//! Keyboard layout:
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes (USB HID usage codes)
//! ```
//!
//! Mouse layout (field width chosen by the report map):
//! ```text
//! Byte 0: Button bitfield (Bit 0 = Left, Bit 1 = Right, Bit 2 = Middle)
//! 8-bit:  Byte 1 = dX, Byte 2 = dY, Byte 3-7 padding
//! 16-bit: Byte 1-2 = dX (LE), Byte 3-4 = dY (LE), Byte 5-7 padding
//! ```

use crate::error::Error;

/// Report size in bytes.
pub const REPORT_SIZE: usize = 8;

/// Number of keycode slots in a keyboard report.
pub const KEYCODE_SLOTS: usize = 6;

const MODIFIER_INDEX: usize = 0;
const KEYCODE_INDEX: usize = 2;

bitflags::bitflags! {
    /// Keyboard modifier byte.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const LEFT_CTRL = 1 << 0;
        const LEFT_SHIFT = 1 << 1;
        const LEFT_ALT = 1 << 2;
        const LEFT_GUI = 1 << 3;
        const RIGHT_CTRL = 1 << 4;
        const RIGHT_SHIFT = 1 << 5;
        const RIGHT_ALT = 1 << 6;
        const RIGHT_GUI = 1 << 7;
    }
}

bitflags::bitflags! {
    /// Mouse button byte.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Modifiers {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Modifiers({=u8:#04x})", self.bits())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Buttons {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Buttons({=u8:#04x})", self.bits())
    }
}

/// One HID input report, exactly [`REPORT_SIZE`] bytes.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report([u8; REPORT_SIZE]);

impl Report {
    /// Create an empty (all-keys-released, no movement) report.
    pub const fn empty() -> Self {
        Self([0; REPORT_SIZE])
    }

    pub const fn from_bytes(bytes: [u8; REPORT_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; REPORT_SIZE] {
        &self.0
    }

    /// Modifier byte when the report is read as a keyboard report.
    pub fn modifier(&self) -> Modifiers {
        Modifiers::from_bits_retain(self.0[MODIFIER_INDEX])
    }

    pub fn set_modifier(&mut self, modifier: Modifiers) {
        self.0[MODIFIER_INDEX] = modifier.bits();
    }

    /// Keycode in `slot` (0..6), or `None` if the slot does not exist.
    pub fn keycode(&self, slot: usize) -> Option<u8> {
        (slot < KEYCODE_SLOTS).then(|| self.0[KEYCODE_INDEX + slot])
    }

    /// Sets the keycode in `slot`. Returns `false` if the slot does not exist.
    pub fn set_keycode(&mut self, slot: usize, keycode: u8) -> bool {
        if slot >= KEYCODE_SLOTS {
            return false;
        }
        self.0[KEYCODE_INDEX + slot] = keycode;
        true
    }

    /// Sets a single byte. Returns `false` if `index` is out of range.
    pub fn set_byte(&mut self, index: usize, value: u8) -> bool {
        match self.0.get_mut(index) {
            Some(b) => {
                *b = value;
                true
            }
            None => false,
        }
    }

    /// Overwrites the first `data.len()` bytes, leaving the rest intact.
    pub fn overwrite_prefix(&mut self, data: &[u8]) -> Result<(), Error> {
        if data.len() > REPORT_SIZE {
            return Err(Error::InvalidLength {
                expected: REPORT_SIZE,
                actual: data.len(),
            });
        }
        self.0[..data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Returns `true` if every byte is zero (the release report).
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}
