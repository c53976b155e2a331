//! Console operation errors.

/// Errors that can occur while driving the terminal.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input ended before a line could be read")]
    EndOfInput,
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
