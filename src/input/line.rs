//! Mouse coordinate line parser.
//!
//! Accepts `x<space>y<CR>` with signed decimal fields and hands off one
//! (x, y) pair per completed line:
//!
//! ```text
//! AwaitingX --space--> AwaitingY --CR (x, y set)--> ReadyToSend --take()--> AwaitingX
//!                       |    ^
//!                       +----+ space (re-parses y)
//! ```
//!
//! Any other byte is appended to a bounded buffer. A CR that cannot
//! complete a pair clears the buffer and leaves the state alone.

use heapless::Vec;

use crate::error::Error;

const SPACE: u8 = b' ';
const CR: u8 = b'\r';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseState {
    #[default]
    AwaitingX,
    AwaitingY,
    /// A complete pair is waiting for [`LineParser::take`].
    ReadyToSend,
}

/// What one pushed byte did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// The byte was appended to the buffer.
    Buffered,
    /// A space captured x.
    FieldX(i32),
    /// A space captured (or re-captured) y.
    FieldY(i32),
    /// A CR completed the line.
    Complete(i32, i32),
    /// A CR arrived without a complete pair; the buffer was dropped.
    Discarded,
}

/// Incremental parser for one line at a time, buffering up to `CAP` bytes.
#[derive(Clone, Debug, Default)]
pub struct LineParser<const CAP: usize> {
    buffer: Vec<u8, CAP>,
    x: Option<i32>,
    y: Option<i32>,
    state: ParseState,
}

impl<const CAP: usize> LineParser<CAP> {
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            x: None,
            y: None,
            state: ParseState::AwaitingX,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn x(&self) -> Option<i32> {
        self.x
    }

    pub fn y(&self) -> Option<i32> {
        self.y
    }

    /// Bytes buffered for the field being typed.
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    /// Feed one byte.
    ///
    /// A pair left in `ReadyToSend` is discarded first, so callers must
    /// [`take`](Self::take) it before pushing more input. Returns
    /// `OverflowDiscard` if the buffer is full; the byte is dropped and
    /// nothing else changes.
    pub fn push(&mut self, byte: u8) -> Result<Step, Error> {
        if self.state == ParseState::ReadyToSend {
            self.reset();
        }

        match byte {
            SPACE => Ok(self.on_space()),
            CR => Ok(self.on_carriage_return()),
            _ => self
                .buffer
                .push(byte)
                .map(|()| Step::Buffered)
                .map_err(|_| Error::OverflowDiscard(byte)),
        }
    }

    /// Hand off a completed pair and start a new line.
    pub fn take(&mut self) -> Option<(i32, i32)> {
        if self.state != ParseState::ReadyToSend {
            return None;
        }
        let pair = self.x.zip(self.y);
        self.reset();
        pair
    }

    /// Drop all partial input.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.x = None;
        self.y = None;
        self.state = ParseState::AwaitingX;
    }

    fn on_space(&mut self) -> Step {
        let value = parse_int(&self.buffer);
        self.buffer.clear();
        match self.state {
            ParseState::AwaitingY => {
                self.y = Some(value);
                Step::FieldY(value)
            }
            ParseState::AwaitingX | ParseState::ReadyToSend => {
                self.x = Some(value);
                self.state = ParseState::AwaitingY;
                Step::FieldX(value)
            }
        }
    }

    fn on_carriage_return(&mut self) -> Step {
        if self.state == ParseState::AwaitingY && self.y.is_none() && !self.buffer.is_empty() {
            self.y = Some(parse_int(&self.buffer));
        }
        self.buffer.clear();

        match (self.state, self.x, self.y) {
            (ParseState::AwaitingY, Some(x), Some(y)) => {
                self.state = ParseState::ReadyToSend;
                Step::Complete(x, y)
            }
            _ => Step::Discarded,
        }
    }
}

/// Lenient decimal parse: leading ASCII whitespace, optional sign, then
/// digits up to the first non-digit. No digits yields 0; values beyond
/// `i32` saturate.
pub fn parse_int(bytes: &[u8]) -> i32 {
    let mut iter = bytes
        .iter()
        .copied()
        .skip_while(u8::is_ascii_whitespace)
        .peekable();

    let negative = match iter.peek() {
        Some(b'-') => {
            iter.next();
            true
        }
        Some(b'+') => {
            iter.next();
            false
        }
        _ => false,
    };

    iter.take_while(u8::is_ascii_digit).fold(0i32, |acc, b| {
        let digit = i32::from(b - b'0');
        if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        }
    })
}
