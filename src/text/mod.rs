//! Text decoding for extracted lines.
//!
//! [`Encoding`] selects how a line's bytes become a `String`. Strict UTF-8
//! failures are classified by the [`utf8`] validator so callers learn both the
//! offset and the kind of the bad sequence.
//!
//! ```
//! use buflines::text::{Encoding, Utf8ErrorKind};
//! use buflines::DecodeErrorKind;
//!
//! assert_eq!(Encoding::Utf8.decode("日本語".as_bytes()).unwrap(), "日本語");
//!
//! let err = Encoding::Utf8.decode(&[b'a', 0x80]).unwrap_err();
//! assert_eq!(err.offset, 1);
//! assert_eq!(err.kind, DecodeErrorKind::Utf8(Utf8ErrorKind::InvalidLeadByte));
//! ```

pub mod encoding;
pub mod utf8;

pub use encoding::{Encoding, UnknownEncoding};
pub use utf8::{validate_utf8, Utf8Error, Utf8ErrorKind};
