//! Raw escape sequence bytes
//!
//! The protocol table for the VT-class device this crate drives. Everything
//! here is a fixed byte value; [`crate::directive`] assembles them into
//! complete sequences.

// === Introducers ===

/// Escape byte (0x1b / 27), 7-bit introducer
pub const ESC: u8 = 0x1b;

/// Control Sequence Introducer as a single 8-bit C1 byte (0x9b / 155)
pub const CSI_8BIT: u8 = 0x9b;

/// Control Sequence Introducer in its 7-bit form (ESC [)
pub const CSI_7BIT: [u8; 2] = [ESC, b'['];

// === Line Attributes (ESC # n) ===

/// Line attribute intermediate byte
pub const LINE_ATTR: u8 = b'#';

/// Double-height, double-width line, top half (DECDHL)
pub const DOUBLE_HEIGHT_TOP: u8 = b'3';

/// Double-height, double-width line, bottom half (DECDHL)
pub const DOUBLE_HEIGHT_BOTTOM: u8 = b'4';

/// Single-width, single-height line (DECSWL)
pub const SINGLE_WIDTH: u8 = b'5';

/// Double-width, single-height line (DECDWL)
pub const DOUBLE_WIDTH: u8 = b'6';

// === Private Modes (CSI ? n h/l) ===

/// Screen mode: reverse video for the whole screen (DECSCNM)
pub const MODE_SCREEN_REVERSE: u16 = 5;

/// Column mode: 132 when set, 80 when reset (DECCOLM)
pub const MODE_COLUMNS_132: u16 = 3;

/// Text cursor enable (DECTCEM)
pub const MODE_CURSOR_VISIBLE: u16 = 25;

// === ANSI Modes (CSI n h/l) ===

/// Keyboard action mode: keyboard locked when set (KAM)
pub const MODE_KEYBOARD_LOCK: u16 = 2;

// === Select Graphic Rendition parameters ===

pub mod sgr {
    /// All attributes off
    pub const RESET: u16 = 0;

    /// Bold / increased intensity
    pub const BOLD: u16 = 1;

    /// Single underline
    pub const UNDERLINE: u16 = 4;

    /// Slow blink
    pub const BLINK: u16 = 5;

    /// Negative image
    pub const INVERSE: u16 = 7;

    /// Normal intensity (bold off)
    pub const NO_BOLD: u16 = 22;

    /// Underline off
    pub const NO_UNDERLINE: u16 = 24;

    /// Blink off
    pub const NO_BLINK: u16 = 25;

    /// Positive image (inverse off)
    pub const NO_INVERSE: u16 = 27;
}

// === Final Bytes ===

/// Set mode
pub const SET_MODE: u8 = b'h';

/// Reset mode
pub const RESET_MODE: u8 = b'l';

/// Select Graphic Rendition
pub const SGR: u8 = b'm';

/// Cursor Position (CUP)
pub const CURSOR_POSITION: u8 = b'H';

/// Erase in Display (ED)
pub const ERASE_DISPLAY: u8 = b'J';

/// ED parameter selecting the entire screen
pub const ERASE_ALL: u16 = 2;

/// Newline byte terminating an input line
pub const NEWLINE: u8 = b'\n';
