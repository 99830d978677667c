//! Unified error type for serial2blehid.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.
//!
//! Only [`Error::InvalidLength`], [`Error::MalformedReportMap`] and
//! registration failures are fatal, and only at construction time. Every
//! other variant describes an input that was dropped or adjusted and is
//! handled where it is detected.

/// Top-level error type used across the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Construction
    /// A fixed-size structure was given input of the wrong size.
    InvalidLength { expected: usize, actual: usize },

    /// The report map is not a keyboard or mouse report descriptor.
    MalformedReportMap,

    // Input
    /// The byte has no HID keyboard equivalent; it was dropped.
    Unsupported(u8),

    /// The line buffer is full; this byte was dropped.
    OverflowDiscard(u8),

    /// Input arrived while no host is connected; it was dropped.
    NotConnected,

    /// A mouse delta exceeded the report field and was saturated.
    /// The report was still sent.
    ClampedValue,

    // Transport
    /// The BLE stack rejected a registration or update.
    Transport(TransportError),
}

/// Subset of BLE stack errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Raw error code from the SoftDevice.
    Raw(u32),
    /// Service or characteristic registration failed.
    RegisterFailed,
    /// The stack returned fewer handles than characteristics registered.
    HandleTableFull,
    /// Notification could not be queued (not connected, CCCD disabled, ...).
    NotifyFailed,
}

// Convenience conversions

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}
