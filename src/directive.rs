//! Terminal directives and their wire encoding
//!
//! Every state change the console can request is a [`Directive`]. The one
//! place that turns a directive into bytes is [`Directive::encode_into`];
//! the byte values themselves live in [`crate::escape`].

use std::io::Write;

use crate::escape::{self, sgr};

/// How directives that use the 8-bit CSI introducer are written.
///
/// The VT-class device this crate targets accepts the single C1 byte 0x9b.
/// Terminals that only understand 7-bit controls (or that decode output as
/// UTF-8, where a lone 0x9b is invalid) need the two-byte `ESC [` form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Keep the 8-bit C1 introducer where the device uses it
    #[default]
    C1,
    /// Rewrite the C1 introducer to `ESC [`
    SevenBit,
}

/// A single terminal state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Single-width, single-height line
    NormalText,
    /// Double-width line
    DoubleWidth,
    /// Double-width, double-height line, top half
    DoubleHeightTop,
    /// Double-width, double-height line, bottom half
    DoubleHeightBottom,
    /// Reverse video for the whole screen
    AllInverse,
    /// Normal video for the whole screen
    AllNormal,
    /// 132-column mode
    Columns132,
    /// 80-column mode
    Columns80,
    Blink,
    Bold,
    Underline,
    Inverse,
    NoBold,
    NoUnderline,
    NoBlink,
    NoInverse,
    /// All character attributes off
    Normal,
    /// Erase the screen and home the cursor
    ClearScreen,
    CursorOff,
    CursorOn,
    /// Lock the keyboard (local echo off)
    KeyOff,
    /// Unlock the keyboard (local echo on)
    KeyOn,
    /// Move the cursor, 1-indexed. Emitted as `<row>;<column>`.
    CursorTo { row: u16, column: u16 },
}

impl Directive {
    /// Every parameterless directive, in table order
    pub const ALL: [Directive; 22] = [
        Directive::NormalText,
        Directive::DoubleWidth,
        Directive::DoubleHeightTop,
        Directive::DoubleHeightBottom,
        Directive::AllInverse,
        Directive::AllNormal,
        Directive::Columns132,
        Directive::Columns80,
        Directive::Blink,
        Directive::Bold,
        Directive::Underline,
        Directive::Inverse,
        Directive::NoBold,
        Directive::NoUnderline,
        Directive::NoBlink,
        Directive::NoInverse,
        Directive::Normal,
        Directive::ClearScreen,
        Directive::CursorOff,
        Directive::CursorOn,
        Directive::KeyOff,
        Directive::KeyOn,
    ];

    /// Short kebab-case name, used by `conionova dump`
    pub fn name(&self) -> &'static str {
        match self {
            Directive::NormalText => "normal-text",
            Directive::DoubleWidth => "double-width",
            Directive::DoubleHeightTop => "double-height-top",
            Directive::DoubleHeightBottom => "double-height-bottom",
            Directive::AllInverse => "all-inverse",
            Directive::AllNormal => "all-normal",
            Directive::Columns132 => "columns-132",
            Directive::Columns80 => "columns-80",
            Directive::Blink => "blink",
            Directive::Bold => "bold",
            Directive::Underline => "underline",
            Directive::Inverse => "inverse",
            Directive::NoBold => "no-bold",
            Directive::NoUnderline => "no-underline",
            Directive::NoBlink => "no-blink",
            Directive::NoInverse => "no-inverse",
            Directive::Normal => "normal",
            Directive::ClearScreen => "clear-screen",
            Directive::CursorOff => "cursor-off",
            Directive::CursorOn => "cursor-on",
            Directive::KeyOff => "key-off",
            Directive::KeyOn => "key-on",
            Directive::CursorTo { .. } => "cursor-to",
        }
    }

    /// Encode into a fresh buffer
    pub fn encode(&self, encoding: Encoding) -> Vec<u8> {
        let mut buf = Vec::with_capacity(16);
        self.encode_into(encoding, &mut buf);
        buf
    }

    /// Append the exact byte sequence for this directive to `buf`
    pub fn encode_into(&self, encoding: Encoding, buf: &mut Vec<u8>) {
        match *self {
            Directive::NormalText => line_attr(buf, escape::SINGLE_WIDTH),
            Directive::DoubleWidth => line_attr(buf, escape::DOUBLE_WIDTH),
            Directive::DoubleHeightTop => line_attr(buf, escape::DOUBLE_HEIGHT_TOP),
            Directive::DoubleHeightBottom => line_attr(buf, escape::DOUBLE_HEIGHT_BOTTOM),

            Directive::AllInverse => {
                private_mode(buf, encoding, escape::MODE_SCREEN_REVERSE, escape::SET_MODE)
            }
            Directive::AllNormal => {
                private_mode(buf, encoding, escape::MODE_SCREEN_REVERSE, escape::RESET_MODE)
            }
            Directive::Columns132 => {
                private_mode(buf, encoding, escape::MODE_COLUMNS_132, escape::SET_MODE)
            }
            Directive::Columns80 => {
                private_mode(buf, encoding, escape::MODE_COLUMNS_132, escape::RESET_MODE)
            }

            Directive::Blink => rendition(buf, encoding, sgr::BLINK),
            Directive::Bold => rendition(buf, encoding, sgr::BOLD),
            Directive::Underline => rendition(buf, encoding, sgr::UNDERLINE),
            Directive::Inverse => rendition(buf, encoding, sgr::INVERSE),
            Directive::NoBold => rendition(buf, encoding, sgr::NO_BOLD),
            Directive::NoUnderline => rendition(buf, encoding, sgr::NO_UNDERLINE),
            Directive::NoBlink => rendition(buf, encoding, sgr::NO_BLINK),
            Directive::NoInverse => rendition(buf, encoding, sgr::NO_INVERSE),
            Directive::Normal => rendition(buf, encoding, sgr::RESET),

            // The screen, cursor and keyboard group always uses ESC [
            Directive::ClearScreen => {
                csi(buf, &[escape::ERASE_ALL], escape::ERASE_DISPLAY);
                csi(buf, &[1, 1], escape::CURSOR_POSITION);
            }
            Directive::CursorOff => {
                buf.extend_from_slice(&escape::CSI_7BIT);
                buf.push(b'?');
                push_params(buf, &[escape::MODE_CURSOR_VISIBLE]);
                buf.push(escape::RESET_MODE);
            }
            Directive::CursorOn => {
                buf.extend_from_slice(&escape::CSI_7BIT);
                buf.push(b'?');
                push_params(buf, &[escape::MODE_CURSOR_VISIBLE]);
                buf.push(escape::SET_MODE);
            }
            Directive::KeyOff => csi(buf, &[escape::MODE_KEYBOARD_LOCK], escape::SET_MODE),
            Directive::KeyOn => csi(buf, &[escape::MODE_KEYBOARD_LOCK], escape::RESET_MODE),
            Directive::CursorTo { row, column } => {
                csi(buf, &[row, column], escape::CURSOR_POSITION)
            }
        }
    }
}

fn line_attr(buf: &mut Vec<u8>, code: u8) {
    buf.extend_from_slice(&[escape::ESC, escape::LINE_ATTR, code]);
}

fn introducer(buf: &mut Vec<u8>, encoding: Encoding) {
    match encoding {
        Encoding::C1 => buf.push(escape::CSI_8BIT),
        Encoding::SevenBit => buf.extend_from_slice(&escape::CSI_7BIT),
    }
}

fn private_mode(buf: &mut Vec<u8>, encoding: Encoding, mode: u16, final_byte: u8) {
    introducer(buf, encoding);
    buf.push(b'?');
    push_params(buf, &[mode]);
    buf.push(final_byte);
}

/// The device expects the SGR parameter doubled, e.g. `1;1m`
fn rendition(buf: &mut Vec<u8>, encoding: Encoding, param: u16) {
    introducer(buf, encoding);
    push_params(buf, &[param, param]);
    buf.push(escape::SGR);
}

fn csi(buf: &mut Vec<u8>, params: &[u16], final_byte: u8) {
    buf.extend_from_slice(&escape::CSI_7BIT);
    push_params(buf, params);
    buf.push(final_byte);
}

fn push_params(buf: &mut Vec<u8>, params: &[u16]) {
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            buf.push(b';');
        }
        // Writing into a Vec cannot fail
        let _ = write!(buf, "{param}");
    }
}
