//! Synthetic line-oriented text for exercising the splitter.
//!
//! Every generated line is terminated, by LF or CRLF at the requested ratio,
//! so the output always splits into exactly as many lines as it has LF bytes.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

use crate::exit_codes;

/// Generate text with a mix of LF, CRLF and empty lines.
#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Approximate output size (supports b, kb, mb, gb)
    #[arg(value_parser = crate::parse_size)]
    pub size: usize,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Random seed for reproducible output
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Fraction of lines terminated by CRLF instead of LF (0.0 to 1.0)
    #[arg(long, default_value = "0.25", value_parser = parse_ratio)]
    pub crlf_ratio: f64,

    /// Fraction of empty lines (0.0 to 1.0)
    #[arg(long, default_value = "0.05", value_parser = parse_ratio)]
    pub empty_ratio: f64,

    /// Line content
    #[arg(short, long, value_enum, default_value = "mixed")]
    pub pattern: LinePattern,
}

/// Kinds of line content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinePattern {
    /// English prose, ASCII only
    Ascii,
    /// Prose with multi-byte UTF-8 words of every sequence length
    Mixed,
    /// Log records: timestamp, level, component and message
    Log,
}

/// Terminator and empty-line mix.
#[derive(Debug, Clone, Copy)]
pub struct LineMix {
    pub crlf_ratio: f64,
    pub empty_ratio: f64,
}

fn parse_ratio(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid ratio: '{}'", s))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("Ratio must be between 0.0 and 1.0, got {}", value))
    }
}

/// Run the generate command.
pub fn run(args: GenerateArgs) -> Result<i32> {
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, size = args.size, pattern = ?args.pattern, "generating lines");

    let mix = LineMix {
        crlf_ratio: args.crlf_ratio,
        empty_ratio: args.empty_ratio,
    };
    let data = generate_lines(args.size, args.pattern, mix, seed);

    match &args.output {
        Some(path) => {
            fs::write(path, &data)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {} bytes to {}", data.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&data).context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
    }

    Ok(exit_codes::SUCCESS)
}

/// Generate at least `target_size` bytes of complete lines.
///
/// Output stops after the line that reaches the target, so it is never cut
/// inside a multi-byte character.
pub fn generate_lines(target_size: usize, pattern: LinePattern, mix: LineMix, seed: u64) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut result = Vec::with_capacity(target_size + 128);
    let mut index = 0usize;

    while result.len() < target_size {
        if !rng.gen_bool(mix.empty_ratio) {
            match pattern {
                LinePattern::Ascii => ascii_line(&mut rng, &mut result),
                LinePattern::Mixed => mixed_line(&mut rng, &mut result),
                LinePattern::Log => log_line(&mut rng, index, &mut result),
            }
        }
        if rng.gen_bool(mix.crlf_ratio) {
            result.extend_from_slice(b"\r\n");
        } else {
            result.push(b'\n');
        }
        index += 1;
    }

    result
}

const SENTENCES: [&str; 8] = [
    "The quick brown fox jumps over the lazy dog.",
    "Pack my box with five dozen liquor jugs.",
    "How vexingly quick daft zebras jump!",
    "The five boxing wizards jump quickly.",
    "Sphinx of black quartz, judge my vow.",
    "Two driven jocks help fax my big quiz.",
    "A wizard's job is to vex chumps quickly in fog.",
    "Carriage returns\rinside a line are content.",
];

fn ascii_line(rng: &mut ChaCha8Rng, out: &mut Vec<u8>) {
    let count = rng.gen_range(1..=3);
    for i in 0..count {
        if i > 0 {
            out.push(b' ');
        }
        out.extend_from_slice(SENTENCES[rng.gen_range(0..SENTENCES.len())].as_bytes());
    }
}

fn mixed_line(rng: &mut ChaCha8Rng, out: &mut Vec<u8>) {
    const WORDS: [&str; 16] = [
        "hello", "line", "buffer", "chunk", // 1-byte
        "café", "naïve", "Привет", "Ελλάδα", // 2-byte
        "日本語", "中文", "한국어", "€100", // 3-byte
        "🦀", "🎉", "𝄞", "👋🏽", // 4-byte
    ];
    let count = rng.gen_range(2..=12);
    for i in 0..count {
        if i > 0 {
            out.push(b' ');
        }
        out.extend_from_slice(WORDS[rng.gen_range(0..WORDS.len())].as_bytes());
    }
}

fn log_line(rng: &mut ChaCha8Rng, index: usize, out: &mut Vec<u8>) {
    const LEVELS: [&str; 4] = ["DEBUG", "INFO", "WARN", "ERROR"];
    const COMPONENTS: [&str; 4] = ["reader", "splitter", "decoder", "writer"];
    const MESSAGES: [&str; 6] = [
        "filled buffer",
        "compacted remainder",
        "connection reset by peer",
        "user 'José' logged in",
        "request completed ✓",
        "retrying after Interrupted",
    ];

    let seconds = index % 86_400;
    let line = format!(
        "2024-01-15T{:02}:{:02}:{:02}.{:03}Z {:5} [{}] {} id={}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60,
        rng.gen_range(0..1000),
        LEVELS[rng.gen_range(0..LEVELS.len())],
        COMPONENTS[rng.gen_range(0..COMPONENTS.len())],
        MESSAGES[rng.gen_range(0..MESSAGES.len())],
        rng.gen::<u32>(),
    );
    out.extend_from_slice(line.as_bytes());
}
