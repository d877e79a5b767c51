//! In-place line extraction.
//!
//! [`extract_lines`] scans the meaningful window of a buffer for LF bytes,
//! decodes every terminated line, and moves the unterminated tail to the front
//! of the buffer so the next read can be appended directly after it:
//!
//! ```text
//!  before:  | a , \n b , \r\n -   t a i l | ? ? ? ? |
//!            <-------- size = 15 ------->
//!  after:   | -   t a i l | ? ? ? ? ? ? ? ? ? ? ? ? |    lines += ["a,", "b,"]
//!            <- rem = 6 ->                               returns 6
//! ```
//!
//! A line ends at LF. If the byte before the LF is CR the pair is treated as a
//! CRLF terminator and both bytes are dropped. An LF at window offset 0 has
//! nothing before it, so it always yields an empty line.
//!
//! Compaction uses [`slice::copy_within`], which has `memmove` semantics and
//! is correct for overlapping source and destination ranges.

use alloc::string::String;
use alloc::vec::Vec;

use memchr::memchr;

use crate::error::ExtractError;
use crate::text::Encoding;

/// Line feed.
pub const LF: u8 = b'\n';

/// Carriage return.
pub const CR: u8 = b'\r';

/// Extract every complete line from `buffer[..size]` and compact the rest.
///
/// Decoded lines are appended to `lines` in buffer order with their LF or
/// CRLF terminator removed. On success the return value is the number of
/// bytes that form the unterminated trailing line; those bytes now occupy
/// `buffer[..remainder]`. Bytes past `remainder` are left in an unspecified
/// state, and bytes past `size` are never read.
///
/// # Errors
///
/// - [`ExtractError::WindowOutOfBounds`] if `size > buffer.len()`. Nothing is
///   modified.
/// - [`ExtractError::Decode`] if a line is invalid under `encoding`. Lines
///   before the failing one remain appended to `lines`; the buffer is left
///   uncompacted, so the caller still holds the whole window.
///
/// # Examples
///
/// ```
/// use buflines::{extract_lines, Encoding};
///
/// let mut buffer = [0u8; 64];
/// let input = b"a,\r\nb,\nc. - tail";
/// buffer[..input.len()].copy_from_slice(input);
///
/// let mut lines = Vec::new();
/// let remainder = extract_lines(&mut buffer, input.len(), Encoding::Utf8, &mut lines).unwrap();
///
/// assert_eq!(lines, ["a,", "b,"]);
/// assert_eq!(&buffer[..remainder], b"c. - tail");
/// ```
pub fn extract_lines(
    buffer: &mut [u8],
    size: usize,
    encoding: Encoding,
    lines: &mut Vec<String>,
) -> Result<usize, ExtractError> {
    let window = window(buffer, size)?;

    let mut spans = line_spans(window);
    let mut line_no = 0;
    while let Some(line) = spans.next() {
        line_no += 1;
        match encoding.decode(line) {
            Ok(text) => lines.push(text),
            Err(source) => {
                let line_start = spans.consumed() - spans.last_terminator_len() - line.len();
                return Err(ExtractError::Decode {
                    line: line_no,
                    column: source.offset + 1,
                    offset: line_start + source.offset,
                    source,
                });
            }
        }
    }

    let consumed = spans.consumed();
    Ok(compact(buffer, consumed, size))
}

/// Result of [`extract`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    /// Complete lines, in buffer order, terminators removed.
    pub lines: Vec<String>,
    /// Length of the unterminated tail now at the front of the buffer.
    pub remainder: usize,
}

/// Like [`extract_lines`], but collects the lines into a fresh vector.
///
/// The buffer is compacted exactly as [`extract_lines`] does. On a decode
/// error the lines decoded so far are discarded with the result.
///
/// ```
/// use buflines::{extract, Encoding};
///
/// let mut buffer = *b"\n\nThe end...";
/// let out = extract(&mut buffer, 12, Encoding::Utf8).unwrap();
/// assert_eq!(out.lines, ["", ""]);
/// assert_eq!(&buffer[..out.remainder], b"The end...");
/// ```
pub fn extract(
    buffer: &mut [u8],
    size: usize,
    encoding: Encoding,
) -> Result<Extracted, ExtractError> {
    let mut lines = Vec::new();
    let remainder = extract_lines(buffer, size, encoding, &mut lines)?;
    Ok(Extracted { lines, remainder })
}

/// Move `buffer[start..end]` to the front of `buffer`, returning its length.
///
/// Source and destination may overlap. Nothing is copied when the range is
/// empty or already starts at offset 0.
///
/// # Panics
///
/// Panics if `start > end` or `end > buffer.len()`.
#[inline]
pub fn compact(buffer: &mut [u8], start: usize, end: usize) -> usize {
    assert!(
        start <= end && end <= buffer.len(),
        "compact range {}..{} out of bounds for buffer of length {}",
        start,
        end,
        buffer.len()
    );
    let remainder = end - start;
    if remainder > 0 && start > 0 {
        buffer.copy_within(start..end, 0);
        tracing::trace!(start, remainder, "compacted partial line");
    }
    remainder
}

/// Iterate over the terminated lines of `window` without decoding them.
///
/// ```
/// use buflines::line_spans;
///
/// let mut spans = line_spans(b"one\r\ntwo\nthr");
/// assert_eq!(spans.next(), Some(&b"one"[..]));
/// assert_eq!(spans.next(), Some(&b"two"[..]));
/// assert_eq!(spans.next(), None);
/// assert_eq!(spans.consumed(), 9);
/// assert_eq!(spans.remainder(), b"thr");
/// ```
pub fn line_spans(window: &[u8]) -> LineSpans<'_> {
    LineSpans {
        window,
        cursor: 0,
        terminator_len: 0,
    }
}

/// Iterator over the LF/CRLF-terminated lines of a byte window.
///
/// Yields each line's content with the terminator removed. The unterminated
/// tail is never yielded; it is available from [`remainder`](Self::remainder)
/// once iteration stops.
#[derive(Debug, Clone)]
pub struct LineSpans<'a> {
    window: &'a [u8],
    cursor: usize,
    terminator_len: usize,
}

impl<'a> LineSpans<'a> {
    /// Number of bytes consumed so far, terminators included.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// The bytes not yet consumed.
    #[inline]
    pub fn remainder(&self) -> &'a [u8] {
        &self.window[self.cursor..]
    }

    /// Length of the terminator of the most recently yielded line (1 or 2),
    /// or 0 before the first line.
    #[inline]
    pub fn last_terminator_len(&self) -> usize {
        self.terminator_len
    }
}

impl<'a> Iterator for LineSpans<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let line_start = self.cursor;
        let line_end = line_start + memchr(LF, &self.window[line_start..])?;

        // The CR test reads the byte before the LF even when it lies before
        // `line_start`; that byte is then the previous LF, never a CR.
        let content_end = if line_end > 0 && self.window[line_end - 1] == CR {
            line_end - 1
        } else {
            line_end
        };
        let content_end = content_end.max(line_start);

        self.terminator_len = line_end + 1 - content_end;
        self.cursor = line_end + 1;
        Some(&self.window[line_start..content_end])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.window.len() - self.cursor))
    }
}

impl core::iter::FusedIterator for LineSpans<'_> {}

fn window(buffer: &[u8], size: usize) -> Result<&[u8], ExtractError> {
    buffer
        .get(..size)
        .ok_or(ExtractError::WindowOutOfBounds {
            size,
            capacity: buffer.len(),
        })
}
