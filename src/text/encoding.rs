//! Text encodings supported by the line decoder.

use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::utf8::{self, Utf8Error, Utf8ErrorKind};
use crate::error::{DecodeError, DecodeErrorKind};

/// How the bytes of a line are turned into text.
///
/// Every supported encoding is ASCII-compatible, so LF (0x0A) and CR (0x0D)
/// can be located byte-wise before decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Encoding {
    /// Strict UTF-8. Invalid sequences are a [`DecodeError`].
    #[default]
    Utf8,
    /// UTF-8 with invalid sequences replaced by U+FFFD.
    Utf8Lossy,
    /// Strict 7-bit ASCII. Bytes at or above 0x80 are a [`DecodeError`].
    Ascii,
    /// ISO-8859-1. Each byte maps to the code point with the same value.
    Latin1,
}

impl Encoding {
    /// All supported encodings.
    pub const ALL: [Encoding; 4] = [
        Encoding::Utf8,
        Encoding::Utf8Lossy,
        Encoding::Ascii,
        Encoding::Latin1,
    ];

    /// Canonical name, as accepted by [`str::parse`].
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf8Lossy => "utf8-lossy",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin1",
        }
    }

    /// Whether [`decode`](Self::decode) can fail for this encoding.
    pub fn is_fallible(self) -> bool {
        matches!(self, Encoding::Utf8 | Encoding::Ascii)
    }

    /// Decode one line's bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use buflines::Encoding;
    ///
    /// assert_eq!(Encoding::Latin1.decode(b"caf\xE9").unwrap(), "café");
    /// assert_eq!(Encoding::Utf8Lossy.decode(b"caf\xE9").unwrap(), "caf\u{FFFD}");
    /// assert!(Encoding::Utf8.decode(b"caf\xE9").is_err());
    /// ```
    pub fn decode(self, bytes: &[u8]) -> Result<String, DecodeError> {
        match self {
            Encoding::Utf8 => match core::str::from_utf8(bytes) {
                Ok(text) => Ok(String::from(text)),
                Err(err) => Err(classify_utf8(bytes, err).into()),
            },
            Encoding::Utf8Lossy => Ok(String::from_utf8_lossy(bytes).into_owned()),
            Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(DecodeError {
                    offset,
                    kind: DecodeErrorKind::NonAscii {
                        byte: bytes[offset],
                    },
                }),
                None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            },
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

/// Re-run the detailed validator to find out why `from_utf8` rejected the
/// input. Falls back to what `core` reported if the two ever disagree.
#[cold]
fn classify_utf8(bytes: &[u8], err: core::str::Utf8Error) -> Utf8Error {
    utf8::validate_utf8(bytes).err().unwrap_or(Utf8Error {
        offset: err.valid_up_to(),
        kind: match err.error_len() {
            None => Utf8ErrorKind::TruncatedSequence,
            Some(_) => Utf8ErrorKind::InvalidLeadByte,
        },
    })
}

impl core::fmt::Display for Encoding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing an unknown encoding name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEncoding(pub String);

impl core::fmt::Display for UnknownEncoding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "unknown encoding '{}' (expected one of: utf8, utf8-lossy, ascii, latin1)",
            self.0
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownEncoding {}

impl core::str::FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let matches = |candidates: &[&str]| candidates.iter().any(|c| name.eq_ignore_ascii_case(c));

        if matches(&["utf8", "utf-8"]) {
            Ok(Encoding::Utf8)
        } else if matches(&["utf8-lossy", "utf-8-lossy"]) {
            Ok(Encoding::Utf8Lossy)
        } else if matches(&["ascii", "us-ascii"]) {
            Ok(Encoding::Ascii)
        } else if matches(&["latin1", "latin-1", "binary", "iso-8859-1"]) {
            Ok(Encoding::Latin1)
        } else {
            Err(UnknownEncoding(String::from(name)))
        }
    }
}
