//! Text rendered back to the serial console.

use core::fmt::{self, Write};

use heapless::String;

use super::{Feedback, Note, Profile};
use crate::config::CONSOLE_LINE_LEN;
use crate::error::Error;

/// One rendered console message.
pub type ConsoleLine = String<CONSOLE_LINE_LEN>;

/// Render the result of one serial byte.
///
/// Only `NotConnected` and `OverflowDiscard` are shown; the other
/// failures are silent on the console.
pub fn render_outcome<W: Write>(
    out: &mut W,
    profile: Profile,
    outcome: &Result<Feedback, Error>,
) -> fmt::Result {
    match outcome {
        Ok(feedback) => render_feedback(out, feedback),
        Err(Error::NotConnected) => write!(out, "{} is not connected\r\n", profile.name()),
        Err(Error::OverflowDiscard(_)) => out.write_str("too many characters typed\r\n"),
        Err(_) => Ok(()),
    }
}

fn render_feedback<W: Write>(out: &mut W, feedback: &Feedback) -> fmt::Result {
    if let Some(byte) = feedback.echo {
        out.write_char(char::from(byte))?;
    }
    match feedback.note {
        None => Ok(()),
        Some(Note::SetX(_)) => out.write_str("set x\r\n"),
        Some(Note::SetY(_)) => out.write_str("set y\r\n"),
        Some(Note::Sending { x, y, clamped }) => {
            write!(out, "Sending {}/{}", x, y)?;
            if clamped {
                out.write_str(" (clamped)")?;
            }
            out.write_str("\r\n")
        }
    }
}

/// `Input passKey: 1 2 3 4 5 6`
pub fn render_passkey<W: Write>(out: &mut W, passkey: &[u8; 6]) -> fmt::Result {
    out.write_str("Input passKey:")?;
    for &digit in passkey {
        write!(out, " {}", char::from(digit))?;
    }
    out.write_str("\r\n")
}

/// Events raised by the BLE stack for the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleEvent {
    /// Passkey the user must type on the host.
    Passkey([u8; 6]),
    /// Link security changed; `true` once encrypted.
    Security(bool),
}

pub fn render_event<W: Write>(out: &mut W, event: &ConsoleEvent) -> fmt::Result {
    match event {
        ConsoleEvent::Passkey(passkey) => render_passkey(out, passkey),
        ConsoleEvent::Security(success) => render_security(out, *success),
    }
}

pub fn render_security<W: Write>(out: &mut W, success: bool) -> fmt::Result {
    if success {
        out.write_str("Security success\r\n")
    } else {
        out.write_str("Security failed\r\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(profile: Profile, outcome: Result<Feedback, Error>) -> ConsoleLine {
        let mut line = ConsoleLine::new();
        render_outcome(&mut line, profile, &outcome).unwrap();
        line
    }

    #[test]
    fn silent_feedback_prints_nothing() {
        assert_eq!(render(Profile::Keyboard, Ok(Feedback::silent())), "");
    }

    #[test]
    fn echo_and_notes() {
        assert_eq!(render(Profile::Mouse, Ok(Feedback::echo(b'7'))), "7");
        assert_eq!(
            render(Profile::Mouse, Ok(Feedback::echo(b' ').with_note(Note::SetX(7)))),
            " set x\r\n"
        );
        assert_eq!(
            render(Profile::Mouse, Ok(Feedback::echo(b' ').with_note(Note::SetY(-1)))),
            " set y\r\n"
        );
    }

    #[test]
    fn sending_line() {
        let note = Note::Sending {
            x: 12,
            y: -34,
            clamped: false,
        };
        assert_eq!(
            render(Profile::Mouse, Ok(Feedback::echo(b'\r').with_note(note))),
            "\rSending 12/-34\r\n"
        );
    }

    #[test]
    fn clamped_sending_fits_one_line() {
        let note = Note::Sending {
            x: i32::MIN,
            y: i32::MIN,
            clamped: true,
        };
        let line = render(Profile::Mouse, Ok(Feedback::echo(b'\r').with_note(note)));
        assert!(line.ends_with(" (clamped)\r\n"));
    }

    #[test]
    fn not_connected_names_profile() {
        assert_eq!(
            render(Profile::Keyboard, Err(Error::NotConnected)),
            "Keyboard is not connected\r\n"
        );
        assert_eq!(
            render(Profile::Mouse, Err(Error::NotConnected)),
            "Mouse is not connected\r\n"
        );
    }

    #[test]
    fn other_errors_are_silent() {
        assert_eq!(render(Profile::Keyboard, Err(Error::Unsupported(0x80))), "");
        assert_eq!(render(Profile::Mouse, Err(Error::ClampedValue)), "");
    }

    #[test]
    fn passkey() {
        let mut line = ConsoleLine::new();
        render_passkey(&mut line, b"123456").unwrap();
        assert_eq!(line, "Input passKey: 1 2 3 4 5 6\r\n");
    }

    #[test]
    fn events() {
        let mut line = ConsoleLine::new();
        render_event(&mut line, &ConsoleEvent::Passkey(*b"000042")).unwrap();
        render_event(&mut line, &ConsoleEvent::Security(true)).unwrap();
        assert_eq!(line, "Input passKey: 0 0 0 0 4 2\r\nSecurity success\r\n");
    }

    #[test]
    fn security_outcome() {
        let mut line = ConsoleLine::new();
        render_security(&mut line, false).unwrap();
        assert_eq!(line, "Security failed\r\n");
    }
}
