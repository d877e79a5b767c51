//! UTF-8 validation with detailed error reporting.
//!
//! The standard library tells us *where* a UTF-8 sequence went wrong but not
//! *why*. Line decoding wants both, so that a failing line can be reported as
//! "overlong encoding at byte 12" rather than a bare offset.
//!
//! ## UTF-8 Encoding Rules
//!
//! | Bytes | First byte    | Continuation bytes | Code point range     |
//! |-------|---------------|-------------------|----------------------|
//! | 1     | `0xxxxxxx`    | -                 | U+0000 - U+007F      |
//! | 2     | `110xxxxx`    | `10xxxxxx`        | U+0080 - U+07FF      |
//! | 3     | `1110xxxx`    | `10xxxxxx` × 2    | U+0800 - U+FFFF      |
//! | 4     | `11110xxx`    | `10xxxxxx` × 3    | U+10000 - U+10FFFF   |
//!
//! Line feed (0x0A) and carriage return (0x0D) are single-byte sequences and
//! never occur inside a multi-byte sequence, which is what makes byte-level
//! line splitting safe for UTF-8 input.

/// Error information for UTF-8 validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf8Error {
    /// The byte offset where the error occurred (0-indexed).
    pub offset: usize,
    /// The kind of UTF-8 error.
    pub kind: Utf8ErrorKind,
}

impl core::fmt::Display for Utf8Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} at byte {}", self.kind, self.offset)
    }
}

/// The specific type of UTF-8 validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Utf8ErrorKind {
    /// A byte in the range 0x80-0xBF (or 0xF8-0xFF) appeared where a lead
    /// byte was expected.
    InvalidLeadByte,

    /// A byte outside the range 0x80-0xBF appeared where a continuation byte
    /// was expected.
    InvalidContinuationByte,

    /// A character was encoded using more bytes than necessary.
    /// For example, encoding ASCII 'A' (U+0041) as `C1 81` instead of `41`.
    OverlongEncoding,

    /// A surrogate code point (U+D800-U+DFFF) was encoded.
    SurrogateCodepoint,

    /// A code point above U+10FFFF was encoded.
    OutOfRangeCodepoint,

    /// A multi-byte sequence was cut off at the end of input.
    ///
    /// For line decoding this means the line ended in the middle of a
    /// character, which usually points at a mismatched encoding.
    TruncatedSequence,
}

impl core::fmt::Display for Utf8ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLeadByte => write!(f, "invalid UTF-8 lead byte"),
            Self::InvalidContinuationByte => write!(f, "invalid UTF-8 continuation byte"),
            Self::OverlongEncoding => write!(f, "overlong UTF-8 encoding"),
            Self::SurrogateCodepoint => write!(f, "surrogate code point in UTF-8"),
            Self::OutOfRangeCodepoint => write!(f, "code point above U+10FFFF"),
            Self::TruncatedSequence => write!(f, "truncated UTF-8 sequence"),
        }
    }
}

/// Validate that the input is valid UTF-8.
///
/// Returns the first error found, with the offset of the offending byte. For
/// continuation errors that is the bad continuation byte itself; for every
/// other kind it is the lead byte of the sequence.
///
/// # Examples
///
/// ```
/// use buflines::text::utf8::{validate_utf8, Utf8ErrorKind};
///
/// assert!(validate_utf8("naïve café".as_bytes()).is_ok());
///
/// let err = validate_utf8(b"ab\xC0\xAF").unwrap_err();
/// assert_eq!(err.kind, Utf8ErrorKind::OverlongEncoding);
/// assert_eq!(err.offset, 2);
/// ```
pub fn validate_utf8(input: &[u8]) -> Result<(), Utf8Error> {
    let len = input.len();
    let mut pos = 0;

    while pos < len {
        let lead = input[pos];
        let seq_len = sequence_length(lead);

        match seq_len {
            0 => return Err(error_at(pos, Utf8ErrorKind::InvalidLeadByte)),
            1 => {
                pos += 1;
                continue;
            }
            _ => {}
        }

        if pos + seq_len > len {
            // A bad continuation inside the truncated tail is the more precise
            // diagnosis.
            if let Some(bad) = first_bad_continuation(&input[pos + 1..]) {
                return Err(error_at(
                    pos + 1 + bad,
                    Utf8ErrorKind::InvalidContinuationByte,
                ));
            }
            return Err(error_at(pos, Utf8ErrorKind::TruncatedSequence));
        }

        let tail = &input[pos + 1..pos + seq_len];
        if let Some(bad) = first_bad_continuation(tail) {
            return Err(error_at(
                pos + 1 + bad,
                Utf8ErrorKind::InvalidContinuationByte,
            ));
        }

        let cp = tail
            .iter()
            .fold(lead_payload(lead, seq_len), |cp, &b| (cp << 6) | (b as u32 & 0x3F));

        // Shortest-form minimum for each sequence length
        let min = match seq_len {
            2 => 0x80,
            3 => 0x800,
            _ => 0x10000,
        };
        if cp < min {
            return Err(error_at(pos, Utf8ErrorKind::OverlongEncoding));
        }
        if (0xD800..=0xDFFF).contains(&cp) {
            return Err(error_at(pos, Utf8ErrorKind::SurrogateCodepoint));
        }
        if cp > 0x10FFFF {
            return Err(error_at(pos, Utf8ErrorKind::OutOfRangeCodepoint));
        }

        pos += seq_len;
    }

    Ok(())
}

#[inline]
fn error_at(offset: usize, kind: Utf8ErrorKind) -> Utf8Error {
    Utf8Error { offset, kind }
}

#[inline]
fn first_bad_continuation(tail: &[u8]) -> Option<usize> {
    tail.iter().position(|&b| !is_continuation_byte(b))
}

#[inline]
fn lead_payload(lead: u8, seq_len: usize) -> u32 {
    match seq_len {
        2 => lead as u32 & 0x1F,
        3 => lead as u32 & 0x0F,
        _ => lead as u32 & 0x07,
    }
}

/// Check if a byte is a valid UTF-8 continuation byte (0x80-0xBF).
#[inline(always)]
pub fn is_continuation_byte(byte: u8) -> bool {
    (byte & 0xC0) == 0x80
}

/// Get the expected sequence length from a lead byte.
/// Returns 0 for invalid lead bytes (continuation bytes or 0xF8+).
#[inline]
pub fn sequence_length(lead_byte: u8) -> usize {
    match lead_byte {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}
