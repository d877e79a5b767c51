//! End-to-end tests of the public API: a caller-driven read loop, encodings,
//! error reporting and the file-backed reader.

use std::io::Write;

use buflines::{
    extract, extract_lines, DecodeErrorKind, Encoding, ExtractError, LineReader, ReadError,
    ReaderConfig, TrailingPolicy,
};

// ============================================================================
// Caller-driven read loop
// ============================================================================

/// Append `chunk` after the remainder and extract, as a socket loop would.
fn push(buffer: &mut [u8], remainder: usize, chunk: &[u8], lines: &mut Vec<String>) -> usize {
    buffer[remainder..remainder + chunk.len()].copy_from_slice(chunk);
    extract_lines(buffer, remainder + chunk.len(), Encoding::Utf8, lines).unwrap()
}

#[test]
fn test_fixed_buffer_session() {
    let mut buffer = [0u8; 16];
    let mut lines = Vec::new();

    let mut remainder = push(&mut buffer, 0, b"GET / HT", &mut lines);
    assert_eq!(remainder, 8);
    remainder = push(&mut buffer, remainder, b"TP/1.1\r\nHost", &mut lines);
    assert_eq!(lines, ["GET / HTTP/1.1"]);
    assert_eq!(&buffer[..remainder], b"Host");
    remainder = push(&mut buffer, remainder, b": x\r\n\r\n", &mut lines);
    assert_eq!(lines, ["GET / HTTP/1.1", "Host: x", ""]);
    assert_eq!(remainder, 0);
}

#[test]
fn test_crlf_split_across_chunks() {
    let mut buffer = [0u8; 8];
    let mut lines = Vec::new();

    let remainder = push(&mut buffer, 0, b"ab\r", &mut lines);
    assert!(lines.is_empty());
    assert_eq!(&buffer[..remainder], b"ab\r");

    let remainder = push(&mut buffer, remainder, b"\ncd", &mut lines);
    assert_eq!(lines, ["ab"]);
    assert_eq!(&buffer[..remainder], b"cd");
}

#[test]
fn test_multibyte_char_split_across_chunks() {
    let text = "żółw\n".as_bytes();
    let mut buffer = [0u8; 16];
    let mut lines = Vec::new();

    let remainder = push(&mut buffer, 0, &text[..2], &mut lines);
    let remainder = push(&mut buffer, remainder, &text[2..], &mut lines);
    assert_eq!(lines, ["żółw"]);
    assert_eq!(remainder, 0);
}

#[test]
fn test_full_buffer_without_terminator() {
    let mut buffer = *b"0123456789";
    let out = extract(&mut buffer, 10, Encoding::Utf8).unwrap();
    assert!(out.lines.is_empty());
    assert_eq!(out.remainder, 10);
    assert_eq!(&buffer, b"0123456789");
}

// ============================================================================
// Encodings
// ============================================================================

#[test]
fn test_encodings_on_same_bytes() {
    let input = b"caf\xC3\xA9\n\xE9t\xE9\n";
    let decode = |encoding: Encoding| {
        let mut buffer = *input;
        extract(&mut buffer, input.len(), encoding)
    };

    assert_eq!(decode(Encoding::Latin1).unwrap().lines, ["cafÃ©", "été"]);
    assert_eq!(decode(Encoding::Utf8Lossy).unwrap().lines, ["café", "\u{FFFD}t\u{FFFD}"]);

    match decode(Encoding::Utf8) {
        Err(ExtractError::Decode { line: 2, column: 2, offset: 7, .. }) => {}
        other => panic!("unexpected: {:?}", other),
    }
    match decode(Encoding::Ascii) {
        Err(ExtractError::Decode { line: 1, column: 4, source, .. }) => {
            assert_eq!(source.kind, DecodeErrorKind::NonAscii { byte: 0xC3 });
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_encoding_names_parse() {
    for encoding in Encoding::ALL {
        assert_eq!(encoding.name().parse::<Encoding>().unwrap(), encoding);
    }
    assert_eq!("ISO-8859-1".parse::<Encoding>().unwrap(), Encoding::Latin1);
    assert!("utf-16".parse::<Encoding>().is_err());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_decode_error_leaves_window_intact() {
    let mut buffer = *b"ok\nbad\xFF\ntail";
    let size = buffer.len();
    let mut lines = Vec::new();
    let err = extract_lines(&mut buffer, size, Encoding::Utf8, &mut lines).unwrap_err();

    assert_eq!(lines, ["ok"]);
    assert_eq!(&buffer, b"ok\nbad\xFF\ntail");
    insta::assert_snapshot!(
        err,
        @"cannot decode line 2, column 4 (window byte 6): invalid UTF-8 lead byte"
    );
}

#[test]
fn test_window_out_of_bounds() {
    let mut buffer = [b'\n'; 4];
    let mut lines = Vec::new();
    let err = extract_lines(&mut buffer, 5, Encoding::Utf8, &mut lines).unwrap_err();
    assert_eq!(err, ExtractError::WindowOutOfBounds { size: 5, capacity: 4 });
    assert!(lines.is_empty());
}

// ============================================================================
// LineReader over files
// ============================================================================

#[test]
fn test_reader_over_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    let mut expected = Vec::new();
    for i in 0..500 {
        let line = format!("record {} {}", i, "·".repeat(i % 7));
        let terminator = if i % 3 == 0 { "\r\n" } else { "\n" };
        write!(file, "{}{}", line, terminator)?;
        expected.push(line);
    }
    file.flush()?;

    let config = ReaderConfig::default().with_capacity(64);
    let reader = LineReader::with_config(std::fs::File::open(file.path())?, config);
    let lines = reader.collect::<Result<Vec<_>, _>>()?;
    assert_eq!(lines, expected);
    Ok(())
}

#[test]
fn test_reader_error_policy_on_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(b"complete\nincomplete")?;
    file.flush()?;

    let config = ReaderConfig::default().with_trailing(TrailingPolicy::Error);
    let mut reader = LineReader::with_config(std::fs::File::open(file.path())?, config);
    assert_eq!(reader.next().transpose()?, Some("complete".to_string()));
    let err = reader.next().and_then(Result::err);
    assert!(matches!(err, Some(ReadError::TruncatedLine { len: 10 })));
    assert!(reader.next().is_none());
    Ok(())
}
