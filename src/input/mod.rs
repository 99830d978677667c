//! Serial input decoding.
//!
//! - [`keymap`]: stateless byte → keystroke table for the keyboard profile
//! - [`line`]: `x y\r` coordinate line parser for the mouse profile

pub mod keymap;
pub mod line;

pub use keymap::{translate, KeyStroke};
pub use line::{parse_int, LineParser, ParseState, Step};
