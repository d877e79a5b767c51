//! Line reading over [`std::io::Read`].
//!
//! [`LineReader`] is the buffer owner that [`extract_lines`](crate::extract_lines)
//! expects: it reads into the free space after the previous remainder, passes
//! `remainder + n` as the window size, and grows the buffer when a single line
//! does not fit.
//!
//! ```
//! use buflines::io::{LineReader, ReaderConfig};
//!
//! let input: &[u8] = b"first\r\nsecond\nthird";
//! let reader = LineReader::with_config(input, ReaderConfig::default().with_capacity(4));
//! let lines: Result<Vec<_>, _> = reader.collect();
//! assert_eq!(lines.unwrap(), ["first", "second", "third"]);
//! ```

mod config;
mod reader;

pub use config::{ReaderConfig, TrailingPolicy, DEFAULT_CAPACITY, DEFAULT_MAX_LINE_LENGTH};
pub use reader::LineReader;

use crate::error::ExtractError;

/// Errors returned by [`LineReader`].
#[derive(Debug)]
pub enum ReadError {
    /// The underlying reader failed.
    Io(std::io::Error),
    /// A line could not be decoded.
    Extract(ExtractError),
    /// A line's content, terminator excluded, is longer than
    /// [`ReaderConfig::max_line_length`].
    LineTooLong {
        /// The configured limit in bytes.
        limit: usize,
    },
    /// Input ended inside a line under [`TrailingPolicy::Error`].
    TruncatedLine {
        /// Number of bytes in the unterminated line.
        len: usize,
    },
}

impl core::fmt::Display for ReadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "read failed: {}", err),
            Self::Extract(err) => write!(f, "{}", err),
            Self::LineTooLong { limit } => {
                write!(f, "line exceeds maximum length of {} bytes", limit)
            }
            Self::TruncatedLine { len } => {
                write!(f, "input ended inside a line ({} bytes without a newline)", len)
            }
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Extract(err) => Some(err),
            Self::LineTooLong { .. } | Self::TruncatedLine { .. } => None,
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ExtractError> for ReadError {
    fn from(err: ExtractError) -> Self {
        Self::Extract(err)
    }
}
