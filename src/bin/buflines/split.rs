//! CLI handler for the `split` command.

use anyhow::{Context, Result};
use buflines::{Encoding, ExtractError, LineReader, ReadError, ReaderConfig, TrailingPolicy};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::exit_codes;

/// Split files or stdin into lines through a fixed-size read buffer.
#[derive(Debug, Parser)]
pub struct SplitArgs {
    /// Input files (reads from stdin if none provided)
    #[arg(trailing_var_arg = true)]
    pub files: Vec<PathBuf>,

    /// Input encoding: utf8, utf8-lossy, ascii, latin1
    #[arg(short, long, default_value = "utf8")]
    pub encoding: Encoding,

    /// Initial buffer size, which is also the largest single read (supports b, kb, mb, gb)
    #[arg(long, default_value = "8kb", value_parser = crate::parse_size)]
    pub chunk_size: usize,

    /// Longest accepted line, terminator excluded (supports b, kb, mb, gb)
    #[arg(long, default_value = "1mb", value_parser = crate::parse_size)]
    pub max_line: usize,

    /// Handling of a final line without a newline
    #[arg(long, value_enum, default_value = "emit")]
    pub trailing: TrailingArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode: no error messages, exit code only
    #[arg(short, long)]
    pub quiet: bool,

    /// Force color output even when not a TTY
    #[arg(short = 'C', long = "color")]
    pub color: bool,

    /// Disable color output
    #[arg(short = 'M', long = "no-color", conflicts_with = "color")]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TrailingArg {
    /// Emit the leftover bytes as a last line
    Emit,
    /// Drop the leftover bytes
    Discard,
    /// Treat the leftover bytes as an error
    Error,
}

impl From<TrailingArg> for TrailingPolicy {
    fn from(arg: TrailingArg) -> Self {
        match arg {
            TrailingArg::Emit => TrailingPolicy::Emit,
            TrailingArg::Discard => TrailingPolicy::Discard,
            TrailingArg::Error => TrailingPolicy::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per output line, LF terminated
    Text,
    /// One JSON object per line with source, line number and text
    Json,
    /// Line count per input
    Count,
}

/// ANSI color codes for error output.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const LOCATION: &str = "\x1b[1;34m"; // Bold blue
    pub const MESSAGE: &str = "\x1b[0;33m"; // Yellow
}

struct ColorScheme {
    error: &'static str,
    location: &'static str,
    message: &'static str,
    reset: &'static str,
}

impl ColorScheme {
    fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                error: colors::ERROR,
                location: colors::LOCATION,
                message: colors::MESSAGE,
                reset: colors::RESET,
            }
        } else {
            Self {
                error: "",
                location: "",
                message: "",
                reset: "",
            }
        }
    }
}

#[derive(Serialize)]
struct LineRecord<'a> {
    source: &'a str,
    line: usize,
    text: &'a str,
}

/// Run the split command.
pub fn run(args: SplitArgs) -> Result<i32> {
    let use_color = if args.no_color {
        false
    } else if args.color {
        true
    } else {
        atty::is(atty::Stream::Stderr)
    };
    let scheme = ColorScheme::new(use_color);

    let config = ReaderConfig::default()
        .with_capacity(args.chunk_size)
        .with_encoding(args.encoding)
        .with_max_line_length(Some(args.max_line))
        .with_trailing(args.trailing.into());
    debug!(?config, "split configuration");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut status = exit_codes::SUCCESS;

    if args.files.is_empty() {
        status = split_input(io::stdin().lock(), "<stdin>", &config, &args, &scheme, &mut out)?;
    } else {
        for path in &args.files {
            let name = path.to_string_lossy();
            let result = match File::open(path) {
                Ok(file) => split_input(file, &name, &config, &args, &scheme, &mut out)?,
                Err(e) => {
                    if !args.quiet {
                        report(&scheme, &name, &e.to_string());
                    }
                    exit_codes::IO_ERROR
                }
            };
            // IO errors take precedence over invalid input
            status = status.max(result);
        }
    }

    out.flush().context("failed to flush stdout")?;
    Ok(status)
}

fn split_input<R: Read, W: Write>(
    input: R,
    name: &str,
    config: &ReaderConfig,
    args: &SplitArgs,
    scheme: &ColorScheme,
    out: &mut W,
) -> Result<i32> {
    let mut count = 0usize;
    let mut status = exit_codes::SUCCESS;

    for item in LineReader::with_config(input, config.clone()) {
        match item {
            Ok(text) => {
                count += 1;
                write_line(out, args.format, name, count, &text)?;
            }
            Err(err) => {
                status = match err {
                    ReadError::Io(_) => exit_codes::IO_ERROR,
                    _ => exit_codes::INVALID,
                };
                if !args.quiet {
                    report(scheme, name, &describe(&err, count));
                }
                break;
            }
        }
    }

    if args.format == OutputFormat::Count {
        writeln!(out, "{}\t{}", count, name)?;
    }
    info!(source = name, lines = count, "split finished");
    Ok(status)
}

fn write_line<W: Write>(
    out: &mut W,
    format: OutputFormat,
    source: &str,
    line: usize,
    text: &str,
) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", text)?,
        OutputFormat::Json => {
            let record = LineRecord { source, line, text };
            serde_json::to_writer(&mut *out, &record)?;
            writeln!(out)?;
        }
        OutputFormat::Count => {}
    }
    Ok(())
}

/// Error text with the stream line number. Lines of the failing window that
/// precede the bad one were already yielded, so the bad line is always the
/// next one after `emitted`.
fn describe(err: &ReadError, emitted: usize) -> String {
    match err {
        ReadError::Extract(ExtractError::Decode { column, source, .. }) => {
            format!("line {}, column {}: {}", emitted + 1, column, source.kind)
        }
        ReadError::LineTooLong { limit } => {
            format!("line {} exceeds maximum length of {} bytes", emitted + 1, limit)
        }
        other => other.to_string(),
    }
}

fn report(scheme: &ColorScheme, name: &str, message: &str) {
    eprintln!(
        "{}error{}: {}{}{}: {}{}{}",
        scheme.error,
        scheme.reset,
        scheme.location,
        name,
        scheme.reset,
        scheme.message,
        message,
        scheme.reset
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use buflines::DecodeError;

    #[test]
    fn json_records() {
        let mut out = Vec::new();
        write_line(&mut out, OutputFormat::Json, "in.txt", 3, "a \"b\"").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"source\":\"in.txt\",\"line\":3,\"text\":\"a \\\"b\\\"\"}\n"
        );
    }

    #[test]
    fn count_format_writes_nothing_per_line() {
        let mut out = Vec::new();
        write_line(&mut out, OutputFormat::Count, "x", 1, "ignored").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn decode_positions_are_stream_relative() {
        let source = DecodeError::from(buflines::text::validate_utf8(b"\xFF").unwrap_err());
        let err = ReadError::Extract(ExtractError::Decode {
            line: 2,
            column: 1,
            offset: 7,
            source,
        });
        assert_eq!(describe(&err, 11), "line 12, column 1: invalid UTF-8 lead byte");
        assert_eq!(
            describe(&ReadError::LineTooLong { limit: 64 }, 4),
            "line 5 exceeds maximum length of 64 bytes"
        );
    }
}
