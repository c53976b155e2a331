//! VT terminal control surface
//!
//! Fixed escape sequences for line size, screen mode, character attributes,
//! cursor and keyboard control, plus a few console helpers:
//! - [`Console::getchar`] reads a line and returns its first character
//! - [`Console::flush_input`] drops type-ahead
//! - [`Console::big_label`] prints double-height text

pub mod config;
pub mod console;
pub mod directive;
pub mod error;
pub mod escape;
pub mod input;

pub use config::Config;
pub use console::Console;
pub use directive::{Directive, Encoding};
pub use error::{ConsoleError, Result};
pub use input::{read_first_char, DiscardPendingInput, TerminalInput, TtySource};
