//! Operator input handling
//!
//! Reads single-character answers from a line-oriented input stream and
//! throws away type-ahead the operator entered before a prompt appeared.

use std::io::{self, BufRead, BufReader, Cursor, Read, Stdin};

use crossterm::tty::IsTty;
use tracing::{debug, trace};

use crate::error::{ConsoleError, Result};
use crate::escape::NEWLINE;

/// Matches std's own stdin buffer so our reads bypass it
const STDIN_BUF_SIZE: usize = 8 * 1024;

/// Read one line and return its first byte as a `char`.
///
/// Bytes map one-to-one onto `U+0000..=U+00FF`; there is no multi-byte
/// decoding. The rest of the line, newline included, is consumed. An empty
/// line yields `'\n'` straight away. If the stream ends after the first byte
/// but before a newline, that first byte is still returned.
///
/// Returns [`ConsoleError::EndOfInput`] when the stream is already exhausted.
pub fn read_first_char<R: Read + ?Sized>(reader: &mut R) -> Result<char> {
    let first = next_byte(reader)?.ok_or(ConsoleError::EndOfInput)?;

    let mut discarded = 0usize;
    if first != NEWLINE {
        while let Some(byte) = next_byte(reader)? {
            if byte == NEWLINE {
                break;
            }
            discarded += 1;
        }
    }

    trace!(first, discarded, "read line");
    Ok(char::from(first))
}

fn next_byte<R: Read + ?Sized>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Input streams that can drop buffered-but-unread data.
///
/// After [`discard_pending_input`](Self::discard_pending_input) returns, the
/// next read must not see bytes that were already pending at the call.
pub trait DiscardPendingInput {
    fn discard_pending_input(&mut self) -> io::Result<()>;

    /// Whether the stream is attached to an interactive terminal
    fn is_interactive(&self) -> bool {
        false
    }
}

impl<R: Read> DiscardPendingInput for BufReader<R> {
    fn discard_pending_input(&mut self) -> io::Result<()> {
        let pending = self.buffer().len();
        self.consume(pending);
        Ok(())
    }
}

impl<T: AsRef<[u8]>> DiscardPendingInput for Cursor<T> {
    fn discard_pending_input(&mut self) -> io::Result<()> {
        let end = self.get_ref().as_ref().len() as u64;
        self.set_position(end);
        Ok(())
    }
}

impl DiscardPendingInput for &[u8] {
    fn discard_pending_input(&mut self) -> io::Result<()> {
        *self = &[];
        Ok(())
    }
}

impl<D: DiscardPendingInput + ?Sized> DiscardPendingInput for &mut D {
    fn discard_pending_input(&mut self) -> io::Result<()> {
        (**self).discard_pending_input()
    }

    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }
}

/// A raw input source that may be attached to a terminal.
pub trait TtySource: Read {
    fn is_terminal(&self) -> bool;

    /// Drop whatever the terminal driver has queued but not yet delivered
    fn purge_queue(&self) -> io::Result<()>;
}

impl TtySource for Stdin {
    fn is_terminal(&self) -> bool {
        IsTty::is_tty(self)
    }

    fn purge_queue(&self) -> io::Result<()> {
        purge_tty_queue(self)
    }
}

/// Buffered terminal input that can also purge the kernel's tty queue.
pub struct TerminalInput<S = Stdin> {
    inner: BufReader<S>,
    purge_tty: bool,
}

impl TerminalInput {
    /// Wrap process stdin. With `purge_tty`, discarding input also drops
    /// whatever the terminal driver has queued but not yet delivered.
    pub fn new(purge_tty: bool) -> Self {
        Self::with_source(io::stdin(), purge_tty)
    }
}

impl<S: TtySource> TerminalInput<S> {
    pub fn with_source(source: S, purge_tty: bool) -> Self {
        Self {
            inner: BufReader::with_capacity(STDIN_BUF_SIZE, source),
            purge_tty,
        }
    }
}

impl<S: TtySource> Read for TerminalInput<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<S: TtySource> BufRead for TerminalInput<S> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }
}

impl<S: TtySource> DiscardPendingInput for TerminalInput<S> {
    fn discard_pending_input(&mut self) -> io::Result<()> {
        let buffered = self.inner.buffer().len();
        self.inner.discard_pending_input()?;

        let purged = self.purge_tty && self.is_interactive();
        if purged {
            self.inner.get_ref().purge_queue()?;
        }

        debug!(buffered, purged, "discarded pending input");
        Ok(())
    }

    fn is_interactive(&self) -> bool {
        self.inner.get_ref().is_terminal()
    }
}

#[cfg(unix)]
fn purge_tty_queue(stdin: &Stdin) -> io::Result<()> {
    use rustix::termios::{tcflush, QueueSelector};

    tcflush(stdin, QueueSelector::IFlush)?;
    Ok(())
}

#[cfg(not(unix))]
fn purge_tty_queue(_stdin: &Stdin) -> io::Result<()> {
    Ok(())
}
