//! Terminal control surface
//!
//! [`Console`] pairs an output stream with an input stream and exposes one
//! method per directive, plus the cursor, label, and input helpers. Every
//! output method performs exactly one `write_all` of the encoded bytes.

use std::io::{self, Read, StdoutLock, Write};

use tracing::{debug, trace};

use crate::config::Config;
use crate::directive::{Directive, Encoding};
use crate::error::Result;
use crate::escape::NEWLINE;
use crate::input::{read_first_char, DiscardPendingInput, TerminalInput};

pub struct Console<W, R> {
    out: W,
    input: R,
    encoding: Encoding,
}

impl Console<StdoutLock<'static>, TerminalInput> {
    /// Console over the process's stdout and stdin
    pub fn stdio(config: &Config) -> Self {
        Self::new(
            io::stdout().lock(),
            TerminalInput::new(config.purge_tty_input),
            config.encoding(),
        )
    }
}

impl<W: Write, R> Console<W, R> {
    pub fn new(out: W, input: R, encoding: Encoding) -> Self {
        Self {
            out,
            input,
            encoding,
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Borrow the output stream
    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_parts(self) -> (W, R) {
        (self.out, self.input)
    }

    /// Write a single directive
    pub fn directive(&mut self, directive: Directive) -> Result<()> {
        trace!(directive = directive.name(), "emit");
        self.out.write_all(&directive.encode(self.encoding))?;
        Ok(())
    }

    /// Write plain text with no escape processing
    pub fn text(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Flush pending output to the terminal
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    // === Line Size ===

    pub fn normal_text(&mut self) -> Result<()> {
        self.directive(Directive::NormalText)
    }

    pub fn double_width(&mut self) -> Result<()> {
        self.directive(Directive::DoubleWidth)
    }

    /// Upper half of a double-width, double-height line
    pub fn double_height_top(&mut self) -> Result<()> {
        self.directive(Directive::DoubleHeightTop)
    }

    /// Lower half of a double-width, double-height line
    pub fn double_height_bottom(&mut self) -> Result<()> {
        self.directive(Directive::DoubleHeightBottom)
    }

    // === Screen Modes ===

    /// Reverse video across the whole screen
    pub fn all_inverse(&mut self) -> Result<()> {
        self.directive(Directive::AllInverse)
    }

    pub fn all_normal(&mut self) -> Result<()> {
        self.directive(Directive::AllNormal)
    }

    pub fn columns_132(&mut self) -> Result<()> {
        self.directive(Directive::Columns132)
    }

    pub fn columns_80(&mut self) -> Result<()> {
        self.directive(Directive::Columns80)
    }

    // === Character Attributes ===

    pub fn blink(&mut self) -> Result<()> {
        self.directive(Directive::Blink)
    }

    pub fn bold(&mut self) -> Result<()> {
        self.directive(Directive::Bold)
    }

    pub fn underline(&mut self) -> Result<()> {
        self.directive(Directive::Underline)
    }

    pub fn inverse(&mut self) -> Result<()> {
        self.directive(Directive::Inverse)
    }

    pub fn no_bold(&mut self) -> Result<()> {
        self.directive(Directive::NoBold)
    }

    pub fn no_underline(&mut self) -> Result<()> {
        self.directive(Directive::NoUnderline)
    }

    pub fn no_blink(&mut self) -> Result<()> {
        self.directive(Directive::NoBlink)
    }

    pub fn no_inverse(&mut self) -> Result<()> {
        self.directive(Directive::NoInverse)
    }

    /// Turn every character attribute off
    pub fn normal(&mut self) -> Result<()> {
        self.directive(Directive::Normal)
    }

    // === Screen, Cursor, Keyboard ===

    /// Erase the screen and home the cursor
    pub fn clear_screen(&mut self) -> Result<()> {
        self.directive(Directive::ClearScreen)
    }

    pub fn cursor_off(&mut self) -> Result<()> {
        self.directive(Directive::CursorOff)
    }

    pub fn cursor_on(&mut self) -> Result<()> {
        self.directive(Directive::CursorOn)
    }

    /// Lock the keyboard; the terminal stops echoing keystrokes
    pub fn key_off(&mut self) -> Result<()> {
        self.directive(Directive::KeyOff)
    }

    pub fn key_on(&mut self) -> Result<()> {
        self.directive(Directive::KeyOn)
    }

    /// Move the cursor to `row`, `column` (1-indexed, not validated)
    pub fn goto(&mut self, row: u16, column: u16) -> Result<()> {
        self.directive(Directive::CursorTo { row, column })
    }

    /// Move the cursor to column `x`, row `y`
    pub fn gotoxy(&mut self, x: u16, y: u16) -> Result<()> {
        self.goto(y, x)
    }

    /// Print `text` as a double-height label whose top half sits on `row`.
    ///
    /// Writes the top half at (`row`, `column`) and the bottom half at
    /// (`row + 1`, `column`), each followed by a newline. No truncation is
    /// applied; long text runs past the right margin.
    pub fn big_label(&mut self, row: u16, column: u16, text: &str) -> Result<()> {
        let halves = [
            (row, Directive::DoubleHeightTop),
            (row.saturating_add(1), Directive::DoubleHeightBottom),
        ];

        let mut buf = Vec::with_capacity(2 * (text.len() + 16));
        for (line, half) in halves {
            Directive::CursorTo { row: line, column }.encode_into(self.encoding, &mut buf);
            half.encode_into(self.encoding, &mut buf);
            buf.extend_from_slice(text.as_bytes());
            buf.push(NEWLINE);
        }

        self.out.write_all(&buf)?;
        Ok(())
    }

    /// [`big_label`](Self::big_label) addressed by column `x`, row `y`
    pub fn big_label_xy(&mut self, x: u16, y: u16, text: &str) -> Result<()> {
        self.big_label(y, x, text)
    }
}

impl<W: Write, R: Read + DiscardPendingInput> Console<W, R> {
    /// Prompt-style read: returns the first character of the next line.
    ///
    /// Pending output is flushed so a prompt is visible. On an interactive
    /// terminal, type-ahead entered before the call is discarded first.
    pub fn getchar(&mut self) -> Result<char> {
        self.out.flush()?;
        if self.input.is_interactive() {
            self.input.discard_pending_input()?;
        }

        let c = read_first_char(&mut self.input)?;
        debug!(?c, "getchar");
        Ok(c)
    }

    /// Flush pending output, then drop any buffered-but-unread input
    pub fn flush_input(&mut self) -> Result<()> {
        self.out.flush()?;
        self.input.discard_pending_input()?;
        debug!("input flushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConsoleError;
    use std::io::{BufRead, BufReader, Cursor};

    /// Tracks the SGR attribute state a VT terminal would hold.
    #[derive(Default, Debug, PartialEq, Eq, Clone, Copy)]
    struct Attrs {
        bold: bool,
        underline: bool,
        blink: bool,
        inverse: bool,
    }

    #[derive(Default)]
    struct Screen {
        attrs: Attrs,
        cursor: Option<(u16, u16)>,
        line_attrs: Vec<u8>,
        erases: usize,
        printed: String,
    }

    impl vte::Perform for Screen {
        fn print(&mut self, c: char) {
            self.printed.push(c);
        }

        fn csi_dispatch(
            &mut self,
            params: &vte::Params,
            _intermediates: &[u8],
            _ignore: bool,
            action: char,
        ) {
            let values: Vec<u16> = params.iter().map(|p| p[0]).collect();
            match action {
                'm' => {
                    for v in values {
                        match v {
                            0 => self.attrs = Attrs::default(),
                            1 => self.attrs.bold = true,
                            4 => self.attrs.underline = true,
                            5 => self.attrs.blink = true,
                            7 => self.attrs.inverse = true,
                            22 => self.attrs.bold = false,
                            24 => self.attrs.underline = false,
                            25 => self.attrs.blink = false,
                            27 => self.attrs.inverse = false,
                            _ => {}
                        }
                    }
                }
                'H' => self.cursor = Some((values[0], values[1])),
                'J' => self.erases += 1,
                _ => {}
            }
        }

        fn esc_dispatch(&mut self, intermediates: &[u8], _ignore: bool, byte: u8) {
            if intermediates == b"#" {
                self.line_attrs.push(byte);
            }
        }
    }

    fn parse(bytes: &[u8]) -> Screen {
        let mut screen = Screen::default();
        let mut parser = vte::Parser::new();
        parser.advance(&mut screen, bytes);
        screen
    }

    fn console(encoding: Encoding) -> Console<Vec<u8>, &'static [u8]> {
        Console::new(Vec::new(), &[][..], encoding)
    }

    #[test]
    fn test_each_operation_is_one_directive() {
        let mut con = console(Encoding::C1);
        con.bold().unwrap();
        con.no_bold().unwrap();
        con.cursor_off().unwrap();
        con.double_width().unwrap();
        assert_eq!(con.output(), b"\x9b1;1m\x9b22;22m\x1b[?25l\x1b#6");
    }

    #[test]
    fn test_attribute_on_then_off_restores_state() {
        type Op = fn(&mut Console<Vec<u8>, &'static [u8]>) -> Result<()>;
        let pairs: [(Op, Op); 4] = [
            (Console::bold, Console::no_bold),
            (Console::underline, Console::no_underline),
            (Console::blink, Console::no_blink),
            (Console::inverse, Console::no_inverse),
        ];

        for (on, off) in pairs {
            let mut con = console(Encoding::SevenBit);
            on(&mut con).unwrap();
            let after_on = parse(con.output()).attrs;
            assert_ne!(after_on, Attrs::default());

            off(&mut con).unwrap();
            assert_eq!(parse(con.output()).attrs, Attrs::default());
        }
    }

    #[test]
    fn test_normal_clears_every_attribute() {
        let mut con = console(Encoding::SevenBit);
        con.bold().unwrap();
        con.underline().unwrap();
        con.blink().unwrap();
        con.inverse().unwrap();
        con.normal().unwrap();
        assert_eq!(parse(con.output()).attrs, Attrs::default());
    }

    #[test]
    fn test_goto_row_then_column() {
        let mut con = console(Encoding::C1);
        con.goto(3, 40).unwrap();
        assert_eq!(con.output(), b"\x1b[3;40H");
        assert_eq!(parse(con.output()).cursor, Some((3, 40)));
    }

    #[test]
    fn test_gotoxy_swaps_into_row_column() {
        let mut con = console(Encoding::C1);
        con.gotoxy(40, 3).unwrap();
        assert_eq!(con.output(), b"\x1b[3;40H");
    }

    #[test]
    fn test_clear_screen_is_one_erase_and_home() {
        let mut con = console(Encoding::C1);
        con.bold().unwrap();
        con.goto(12, 12).unwrap();
        let before = con.output().len();
        con.clear_screen().unwrap();

        let emitted = &con.output()[before..];
        assert_eq!(emitted, b"\x1b[2J\x1b[1;1H");
        let screen = parse(emitted);
        assert_eq!(screen.erases, 1);
        assert_eq!(screen.cursor, Some((1, 1)));
    }

    #[test]
    fn test_big_label_bytes() {
        let mut con = console(Encoding::C1);
        con.big_label(10, 5, "HI").unwrap();
        assert_eq!(
            con.output(),
            b"\x1b[10;5H\x1b#3HI\n\x1b[11;5H\x1b#4HI\n"
        );
    }

    #[test]
    fn test_big_label_xy_matches_big_label() {
        let mut by_xy = console(Encoding::C1);
        by_xy.big_label_xy(5, 10, "HI").unwrap();
        let mut by_row = console(Encoding::C1);
        by_row.big_label(10, 5, "HI").unwrap();
        assert_eq!(by_xy.output(), by_row.output());
    }

    #[test]
    fn test_big_label_parses_as_real_escapes() {
        let mut con = console(Encoding::C1);
        con.big_label(1, 1, "TITLE").unwrap();
        let screen = parse(con.output());
        assert_eq!(screen.line_attrs, vec![b'3', b'4']);
        assert_eq!(screen.printed, "TITLETITLE");
        assert!(!screen.printed.contains('^'));
    }

    #[test]
    fn test_big_label_bottom_row_saturates() {
        let mut con = console(Encoding::C1);
        con.big_label(u16::MAX, 1, "X").unwrap();
        let expected = format!("\x1b[{max};1H\x1b#3X\n\x1b[{max};1H\x1b#4X\n", max = u16::MAX);
        assert_eq!(con.output(), expected.as_bytes());
    }

    #[test]
    fn test_getchar_reads_first_char() {
        let mut con = Console::new(Vec::new(), &b"AB\nC\n"[..], Encoding::C1);
        assert_eq!(con.getchar().unwrap(), 'A');
        assert_eq!(con.getchar().unwrap(), 'C');
        assert!(matches!(con.getchar(), Err(ConsoleError::EndOfInput)));
    }

    #[test]
    fn test_getchar_keeps_input_when_not_interactive() {
        // Piped input must not be drained before reading
        let reader = BufReader::new(&b"y\n"[..]);
        let mut con = Console::new(Vec::new(), reader, Encoding::C1);
        assert_eq!(con.getchar().unwrap(), 'y');
    }

    #[test]
    fn test_flush_input_discards_buffered_bytes() {
        let mut reader = BufReader::new(&b"12345"[..]);
        reader.fill_buf().unwrap();
        let mut con = Console::new(Vec::new(), reader, Encoding::C1);

        con.flush_input().unwrap();

        let (_, mut reader) = con.into_parts();
        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).unwrap();
        assert!(rest.is_empty());
    }

    #[test]
    fn test_flush_input_then_getchar_hits_end_of_input() {
        let mut con = Console::new(Vec::new(), Cursor::new(b"old\n".to_vec()), Encoding::C1);
        con.text("prompt> ").unwrap();
        con.flush_input().unwrap();
        assert!(matches!(con.getchar(), Err(ConsoleError::EndOfInput)));
        assert_eq!(con.output(), b"prompt> ");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut con = Console::new(FailingWriter, &b""[..], Encoding::C1);
        assert!(matches!(con.clear_screen(), Err(ConsoleError::Io(_))));
    }

    /// Interactive reader holding type-ahead; discarding swaps in what the
    /// operator types after the prompt
    struct TypeAhead {
        pending: &'static [u8],
        after_discard: &'static [u8],
        discards: usize,
    }

    impl Read for TypeAhead {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.pending.read(buf)
        }
    }

    impl DiscardPendingInput for TypeAhead {
        fn discard_pending_input(&mut self) -> io::Result<()> {
            self.pending = self.after_discard;
            self.discards += 1;
            Ok(())
        }

        fn is_interactive(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_getchar_drops_type_ahead_on_a_terminal() {
        let input = TypeAhead {
            pending: b"stale\n",
            after_discard: b"Z\n",
            discards: 0,
        };
        let mut con = Console::new(Vec::new(), input, Encoding::C1);
        con.text("Continue? ").unwrap();

        assert_eq!(con.getchar().unwrap(), 'Z');

        let (out, input) = con.into_parts();
        assert_eq!(out, b"Continue? ");
        assert_eq!(input.discards, 1);
    }
}
