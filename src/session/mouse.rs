//! Mouse session: serial lines of `x y` become left clicks with movement.

use super::{Feedback, Note, Profile, SerialInput};
use crate::config::LINE_BUFFER_LEN;
use crate::error::Error;
use crate::hid::mouse::{MOUSE_REPORT_MAP_LEN, WIDE_MOUSE_REPORT_MAP_LEN};
use crate::hid::{Buttons, ReportEncoder, ReportKind};
use crate::input::{LineParser, Step};
use crate::service::{AttributeRegistry, AttributeWriteHandler, HidService, Registration, Transport};

/// Mouse session over a report map of `N` bytes, buffering up to `CAP`
/// bytes per field.
pub struct MouseService<T, const N: usize, const CAP: usize> {
    hid: HidService<T, N>,
    parser: LineParser<CAP>,
}

/// 8-bit deltas.
pub type BootMouseService<T> = MouseService<T, MOUSE_REPORT_MAP_LEN, LINE_BUFFER_LEN>;
/// 16-bit deltas.
pub type WideMouseService<T> = MouseService<T, WIDE_MOUSE_REPORT_MAP_LEN, LINE_BUFFER_LEN>;

impl<T: Transport, const N: usize, const CAP: usize> MouseService<T, N, CAP> {
    pub fn new<R: AttributeRegistry>(
        registration: &mut Registration,
        registry: &mut R,
        transport: T,
        report_map: &[u8],
    ) -> Result<Self, Error> {
        let encoder = ReportEncoder::<N>::new(report_map)?;
        if encoder.layout().kind != ReportKind::Mouse {
            return Err(Error::MalformedReportMap);
        }
        Ok(Self {
            hid: HidService::new(registration, registry, transport, encoder)?,
            parser: LineParser::new(),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.hid.is_connected()
    }

    /// Send one mouse report.
    ///
    /// Returns `ClampedValue` after sending if a delta had to be
    /// saturated. Nothing is touched while disconnected.
    pub fn submit(&mut self, dx: i16, dy: i16, buttons: Buttons) -> Result<(), Error> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        let update = self.hid.encoder_mut().update_mouse_report(dx, dy, buttons);
        self.hid.notify()?;
        update.status()
    }

    /// Alias of [`submit`](Self::submit).
    pub fn send_mouse(&mut self, dx: i16, dy: i16, buttons: Buttons) -> Result<(), Error> {
        self.submit(dx, dy, buttons)
    }

    /// Left press then release, both carrying the same movement.
    pub fn click(&mut self, dx: i16, dy: i16) -> Result<(), Error> {
        let press = self.submit(dx, dy, Buttons::LEFT);
        if press == Err(Error::NotConnected) {
            return press;
        }
        let release = self.submit(dx, dy, Buttons::empty());
        // A transport failure outranks a clamp.
        match (press, release) {
            (Err(Error::Transport(e)), _) | (_, Err(Error::Transport(e))) => Err(Error::Transport(e)),
            (Err(e), _) | (_, Err(e)) => Err(e),
            _ => Ok(()),
        }
    }

    /// Feed one byte of line input.
    ///
    /// A completed line is sent with [`click`](Self::click). Input that
    /// arrives while disconnected is dropped before it reaches the parser.
    pub fn feed(&mut self, byte: u8) -> Result<Feedback, Error> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }

        let feedback = Feedback::echo(byte);
        match self.parser.push(byte)? {
            Step::Buffered | Step::Discarded => Ok(feedback),
            Step::FieldX(x) => Ok(feedback.with_note(Note::SetX(x))),
            Step::FieldY(y) => Ok(feedback.with_note(Note::SetY(y))),
            Step::Complete(..) => {
                let Some((x, y)) = self.parser.take() else {
                    return Ok(feedback);
                };
                #[cfg(feature = "defmt")]
                defmt::info!("Sending {}/{}", x, y);

                let (dx, narrowed_x) = narrow(x);
                let (dy, narrowed_y) = narrow(y);
                let clamped = match self.click(dx, dy) {
                    Ok(()) => narrowed_x || narrowed_y,
                    Err(Error::ClampedValue) => true,
                    Err(e) => return Err(e),
                };
                Ok(feedback.with_note(Note::Sending { x, y, clamped }))
            }
        }
    }

    pub fn parser(&self) -> &LineParser<CAP> {
        &self.parser
    }

    pub fn service(&self) -> &HidService<T, N> {
        &self.hid
    }

    pub fn service_mut(&mut self) -> &mut HidService<T, N> {
        &mut self.hid
    }
}

/// Saturate a parsed field into the `i16` the encoder takes.
fn narrow(value: i32) -> (i16, bool) {
    match i16::try_from(value) {
        Ok(v) => (v, false),
        Err(_) if value < 0 => (i16::MIN, true),
        Err(_) => (i16::MAX, true),
    }
}

impl<T: Transport, const N: usize, const CAP: usize> SerialInput for MouseService<T, N, CAP> {
    const PROFILE: Profile = Profile::Mouse;

    fn on_serial_byte(&mut self, byte: u8) -> Result<Feedback, Error> {
        self.feed(byte)
    }

    fn on_disconnect(&mut self) {
        self.parser.reset();
    }
}

impl<T, const N: usize, const CAP: usize> AttributeWriteHandler for MouseService<T, N, CAP> {
    fn on_attribute_written(&mut self, handle: u16, data: &[u8]) {
        self.hid.on_attribute_written(handle, data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_saturates() {
        assert_eq!(narrow(12), (12, false));
        assert_eq!(narrow(-32768), (i16::MIN, false));
        assert_eq!(narrow(40_000), (i16::MAX, true));
        assert_eq!(narrow(-40_000), (i16::MIN, true));
    }
}
