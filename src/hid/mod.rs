//! HID report types, report maps and the report encoder.

pub mod encoder;
pub mod info;
pub mod keyboard;
pub mod mouse;
pub mod report;
pub mod report_protocol;

#[cfg(test)]
mod tests;

pub use encoder::{KeyboardEncoder, MouseEncoder, MouseUpdate, ReportEncoder, WideMouseEncoder};
pub use info::{ControlPoint, HidFlags, HidInformation, ProtocolMode};
pub use report::{Buttons, Modifiers, Report, REPORT_SIZE};
pub use report_protocol::{ReportKind, ReportLayout};
