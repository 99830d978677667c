//! Session drivers: the connection-gated entry points the serial task
//! calls once per received byte.

pub mod console;
pub mod keyboard;
pub mod mouse;

pub use console::{
    render_event, render_outcome, render_passkey, render_security, ConsoleEvent, ConsoleLine,
};
pub use keyboard::KeyboardService;
pub use mouse::{BootMouseService, MouseService, WideMouseService};

use crate::error::Error;

/// Which HID profile a firmware image runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Profile {
    Keyboard,
    Mouse,
}

impl Profile {
    pub fn name(self) -> &'static str {
        match self {
            Profile::Keyboard => "Keyboard",
            Profile::Mouse => "Mouse",
        }
    }
}

/// Something the mouse line parser wants shown on the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Note {
    SetX(i32),
    SetY(i32),
    /// A line was sent as a click with this movement.
    Sending { x: i32, y: i32, clamped: bool },
}

/// Console output for one accepted serial byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Feedback {
    /// Byte to echo back.
    pub echo: Option<u8>,
    pub note: Option<Note>,
}

impl Feedback {
    pub const fn silent() -> Self {
        Self {
            echo: None,
            note: None,
        }
    }

    pub const fn echo(byte: u8) -> Self {
        Self {
            echo: Some(byte),
            note: None,
        }
    }

    pub const fn with_note(mut self, note: Note) -> Self {
        self.note = Some(note);
        self
    }
}

/// A session that consumes raw serial bytes.
pub trait SerialInput {
    const PROFILE: Profile;

    fn on_serial_byte(&mut self, byte: u8) -> Result<Feedback, Error>;

    /// The host went away: drop any partially typed input.
    fn on_disconnect(&mut self) {}
}
