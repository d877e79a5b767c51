//! Configuration for [`LineReader`](super::LineReader).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::text::Encoding;

/// What to do with bytes left over when the input ends without a final LF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TrailingPolicy {
    /// Decode the leftover bytes and yield them as a last line.
    #[default]
    Emit,
    /// Drop the leftover bytes (logged at `warn` level).
    Discard,
    /// Fail with [`ReadError::TruncatedLine`](super::ReadError::TruncatedLine).
    Error,
}

/// Configuration for [`LineReader`](super::LineReader).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderConfig {
    /// Initial buffer size in bytes, and the largest single read (default: 8 KiB)
    pub capacity: usize,
    /// Encoding of the input (default: strict UTF-8)
    pub encoding: Encoding,
    /// Longest accepted line content in bytes, LF or CRLF excluded
    /// (default: 1 MiB). Longer lines are an error whatever `capacity` is,
    /// and the buffer never grows past this plus two bytes. `None` lets the
    /// buffer grow without bound.
    pub max_line_length: Option<usize>,
    /// Handling of an unterminated final line (default: emit it)
    pub trailing: TrailingPolicy,
}

/// Default initial buffer size.
pub const DEFAULT_CAPACITY: usize = 8 * 1024;

/// Default cap on buffer growth.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024 * 1024;

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            encoding: Encoding::Utf8,
            max_line_length: Some(DEFAULT_MAX_LINE_LENGTH),
            trailing: TrailingPolicy::Emit,
        }
    }
}

impl ReaderConfig {
    /// Set the initial buffer size. Zero is treated as one.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the input encoding.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the growth limit; `None` removes it.
    pub fn with_max_line_length(mut self, limit: Option<usize>) -> Self {
        self.max_line_length = limit;
        self
    }

    /// Set the unterminated-final-line policy.
    pub fn with_trailing(mut self, trailing: TrailingPolicy) -> Self {
        self.trailing = trailing;
        self
    }
}
