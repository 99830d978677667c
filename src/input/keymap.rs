//! ASCII → HID keyboard usage translation (US layout).
//!
//! A flat 128-entry table built at compile time. Bytes with no
//! Keyboard/Keypad page equivalent (most control characters and anything
//! at or above 0x80) map to nothing and are reported as
//! [`Error::Unsupported`].

use crate::error::Error;
use crate::hid::keyboard::usage;
use crate::hid::Modifiers;

/// One key press: modifier byte plus a single keycode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyStroke {
    pub modifier: Modifiers,
    pub keycode: u8,
}

impl KeyStroke {
    pub const fn plain(keycode: u8) -> Self {
        Self {
            modifier: Modifiers::empty(),
            keycode,
        }
    }

    pub const fn shifted(keycode: u8) -> Self {
        Self {
            modifier: Modifiers::LEFT_SHIFT,
            keycode,
        }
    }
}

/// (unshifted, shifted, usage) for the punctuation keys.
const PUNCTUATION: [(u8, u8, u8); 11] = [
    (b'-', b'_', usage::MINUS),
    (b'=', b'+', usage::EQUAL),
    (b'[', b'{', usage::LEFT_BRACKET),
    (b']', b'}', usage::RIGHT_BRACKET),
    (b'\\', b'|', usage::BACKSLASH),
    (b';', b':', usage::SEMICOLON),
    (b'\'', b'"', usage::APOSTROPHE),
    (b'`', b'~', usage::GRAVE),
    (b',', b'<', usage::COMMA),
    (b'.', b'>', usage::PERIOD),
    (b'/', b'?', usage::SLASH),
];

/// Shifted symbols on the digit row, in `1..=9, 0` key order.
const DIGIT_ROW_SHIFTED: [u8; 10] = *b"!@#$%^&*()";

const ASCII_BS: u8 = 0x08;
const ASCII_ESC: u8 = 0x1B;
const ASCII_DEL: u8 = 0x7F;

static KEYMAP: [Option<KeyStroke>; 128] = build_keymap();

const fn build_keymap() -> [Option<KeyStroke>; 128] {
    let mut map: [Option<KeyStroke>; 128] = [None; 128];

    let mut i = 0;
    while i < 26 {
        let code = usage::A + i as u8;
        map[b'a' as usize + i] = Some(KeyStroke::plain(code));
        map[b'A' as usize + i] = Some(KeyStroke::shifted(code));
        i += 1;
    }

    // Usage IDs run 1, 2, ... 9, 0.
    let mut d = 0;
    while d < 10 {
        let code = usage::N1 + d as u8;
        let digit = if d == 9 { b'0' } else { b'1' + d as u8 };
        map[digit as usize] = Some(KeyStroke::plain(code));
        map[DIGIT_ROW_SHIFTED[d] as usize] = Some(KeyStroke::shifted(code));
        d += 1;
    }

    let mut p = 0;
    while p < PUNCTUATION.len() {
        let (plain, shifted, code) = PUNCTUATION[p];
        map[plain as usize] = Some(KeyStroke::plain(code));
        map[shifted as usize] = Some(KeyStroke::shifted(code));
        p += 1;
    }

    map[b' ' as usize] = Some(KeyStroke::plain(usage::SPACE));
    map[b'\r' as usize] = Some(KeyStroke::plain(usage::ENTER));
    map[b'\n' as usize] = Some(KeyStroke::plain(usage::ENTER));
    map[b'\t' as usize] = Some(KeyStroke::plain(usage::TAB));
    map[ASCII_BS as usize] = Some(KeyStroke::plain(usage::BACKSPACE));
    map[ASCII_ESC as usize] = Some(KeyStroke::plain(usage::ESCAPE));
    map[ASCII_DEL as usize] = Some(KeyStroke::plain(usage::DELETE));

    map
}

/// Translate one serial byte into the key that types it.
pub fn translate(byte: u8) -> Result<KeyStroke, Error> {
    KEYMAP
        .get(usize::from(byte))
        .copied()
        .flatten()
        .ok_or(Error::Unsupported(byte))
}
