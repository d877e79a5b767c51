//! Error types for line extraction.
//!
//! Decoding failures carry enough position information to point at the
//! offending byte in the caller's buffer: the line number within the scanned
//! window, the byte column within that line, and the absolute window offset.

use crate::text::utf8::{Utf8Error, Utf8ErrorKind};

/// A line's bytes could not be decoded under the requested encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    /// Byte offset of the failure within the line (0-indexed).
    pub offset: usize,
    /// What went wrong.
    pub kind: DecodeErrorKind,
}

/// The specific reason a decode failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
    /// Invalid UTF-8 under [`Encoding::Utf8`](crate::Encoding::Utf8).
    Utf8(Utf8ErrorKind),
    /// A byte at or above 0x80 under [`Encoding::Ascii`](crate::Encoding::Ascii).
    NonAscii {
        /// The offending byte.
        byte: u8,
    },
}

impl From<Utf8Error> for DecodeError {
    fn from(err: Utf8Error) -> Self {
        Self {
            offset: err.offset,
            kind: DecodeErrorKind::Utf8(err.kind),
        }
    }
}

impl core::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Utf8(kind) => write!(f, "{}", kind),
            Self::NonAscii { byte } => write!(f, "non-ASCII byte 0x{:02X}", byte),
        }
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} at byte {}", self.kind, self.offset)
    }
}

/// Errors returned by [`extract_lines`](crate::extract_lines).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The caller asked for a window larger than the buffer.
    ///
    /// Nothing is read, written or appended when this is returned.
    WindowOutOfBounds {
        /// The requested meaningful size.
        size: usize,
        /// The buffer's length.
        capacity: usize,
    },
    /// A terminated line failed to decode.
    ///
    /// Lines before the failing one have already been appended to the output
    /// and the buffer has not been compacted.
    Decode {
        /// 1-indexed number of the failing line within the window.
        line: usize,
        /// 1-indexed byte column of the failure within the line.
        column: usize,
        /// Absolute byte offset of the failure within the window.
        offset: usize,
        /// The underlying decode failure.
        source: DecodeError,
    },
}

impl core::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::WindowOutOfBounds { size, capacity } => write!(
                f,
                "window size {} exceeds buffer capacity {}",
                size, capacity
            ),
            Self::Decode {
                line,
                column,
                offset,
                source,
            } => write!(
                f,
                "cannot decode line {}, column {} (window byte {}): {}",
                line, column, offset, source.kind
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Utf8Error {}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

#[cfg(feature = "std")]
impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::WindowOutOfBounds { .. } => None,
            Self::Decode { source, .. } => Some(source),
        }
    }
}
