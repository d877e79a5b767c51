//! Buflines CLI tool for reassembling lines from chunked byte streams.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod generate;
mod split;

#[derive(Debug, Parser)]
#[command(name = "buflines")]
#[command(about = "Reassemble text lines from chunked byte streams", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v: debug, -vv: trace). RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Split files (or stdin) into lines using a fixed-size read buffer
    Split(split::SplitArgs),
    /// Generate synthetic line-oriented text with mixed LF/CRLF terminators
    Generate(generate::GenerateArgs),
}

/// Exit codes shared by all commands.
pub mod exit_codes {
    /// All input processed.
    pub const SUCCESS: i32 = 0;
    /// A line could not be decoded or was too long.
    pub const INVALID: i32 = 1;
    /// I/O error (file not found, permission denied, etc.).
    pub const IO_ERROR: i32 = 2;
}

/// Parse size string like "1mb", "512KB", "2GB", "1024" (case insensitive)
pub fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim().to_lowercase();

    if let Ok(bytes) = s.parse::<usize>() {
        return Ok(bytes);
    }

    let units: [(&str, usize); 4] = [
        ("gb", 1024 * 1024 * 1024),
        ("mb", 1024 * 1024),
        ("kb", 1024),
        ("b", 1),
    ];
    let (num_str, unit) = units
        .iter()
        .find_map(|&(suffix, unit)| s.strip_suffix(suffix).map(|num| (num, unit)))
        .ok_or_else(|| {
            format!(
                "Invalid size format: '{}'. Use format like '1mb', '512KB', or '1024'",
                s
            )
        })?;

    num_str
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_mul(unit))
        .ok_or_else(|| format!("Invalid number in size: '{}'", s))
}

fn install_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    install_tracing(cli.verbose);

    let code = match cli.command {
        Command::Split(args) => split::run(args)?,
        Command::Generate(args) => generate::run(args)?,
    };

    if code != exit_codes::SUCCESS {
        std::process::exit(code);
    }
    Ok(())
}
