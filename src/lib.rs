//! # Buflines
//!
//! In-place line reassembly for byte streams read in chunks.
//!
//! Bytes arrive from a socket, pipe or file in arbitrary pieces. This crate
//! turns them into text lines without allocating a new buffer per chunk: the
//! caller keeps one buffer, [`extract_lines`] pulls out every complete line
//! and moves the unfinished tail to the front, and the next read is appended
//! right after it.
//!
//! ## Module Organization
//!
//! - [`lines`] - The extractor: [`extract_lines`], [`extract`], [`line_spans`], [`compact`]
//! - [`text`] - Per-line decoding ([`Encoding`]) and detailed UTF-8 validation
//! - [`error`] - [`ExtractError`] and [`DecodeError`]
//! - [`io`] - [`LineReader`](io::LineReader), a buffer owner driving any `std::io::Read` (requires `std`)
//!
//! ## Quick Start
//!
//! ```
//! use buflines::{extract_lines, Encoding};
//!
//! let mut buffer = [0u8; 64];
//! let mut lines = Vec::new();
//!
//! // First chunk ends halfway through a line.
//! let chunk = b"a,\nb,\r\nc. - ta";
//! buffer[..chunk.len()].copy_from_slice(chunk);
//! let remainder = extract_lines(&mut buffer, chunk.len(), Encoding::Utf8, &mut lines).unwrap();
//! assert_eq!(lines, ["a,", "b,"]);
//! assert_eq!(&buffer[..remainder], b"c. - ta");
//!
//! // Append the next chunk right after the remainder.
//! let chunk = b"il\n";
//! buffer[remainder..remainder + chunk.len()].copy_from_slice(chunk);
//! let remainder =
//!     extract_lines(&mut buffer, remainder + chunk.len(), Encoding::Utf8, &mut lines).unwrap();
//! assert_eq!(lines, ["a,", "b,", "c. - tail"]);
//! assert_eq!(remainder, 0);
//! ```
//!
//! ## Line Terminators
//!
//! A line ends at LF (0x0A). A CR (0x0D) directly before the LF is part of the
//! terminator and is removed too. A CR anywhere else is ordinary content.
//!
//! ## Features
//!
//! - `std` (default) - the [`io`] module and `std::error::Error` impls
//! - `serde` - Serialization of [`Encoding`] and `io::ReaderConfig`
//! - `cli` - The `buflines` command line tool

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

// =============================================================================
// Core modules
// =============================================================================

/// Line extraction and in-place buffer compaction.
pub mod lines;

/// Text decoding for extracted lines.
pub mod text;

/// Error types.
pub mod error;

// =============================================================================
// I/O integration
// =============================================================================

/// Reading lines from `std::io::Read` sources.
#[cfg(feature = "std")]
pub mod io;

// =============================================================================
// Public re-exports
// =============================================================================

pub use error::{DecodeError, DecodeErrorKind, ExtractError};
pub use lines::{compact, extract, extract_lines, line_spans, Extracted, LineSpans, CR, LF};
pub use text::Encoding;

#[cfg(feature = "std")]
pub use io::{LineReader, ReadError, ReaderConfig, TrailingPolicy};
