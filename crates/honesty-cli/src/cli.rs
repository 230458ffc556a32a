//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "honesty")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cross-check the source files of a release's artifacts
    Check(CheckArgs),
    /// Report whether a release's sdist declares a PEP 517 build system
    Backend(BackendArgs),
    /// Classify distribution filenames
    Classify(ClassifyArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

/// Where a release's metadata and artifacts come from.
#[derive(clap::Args)]
pub struct SourceArgs {
    /// Package name
    #[arg(value_name = "PACKAGE")]
    pub package: String,

    /// Release version
    #[arg(id = "release", value_name = "VERSION")]
    pub version: String,

    /// Package index document (`.json` for the JSON API, otherwise simple HTML)
    #[arg(long, value_name = "FILE")]
    pub index: PathBuf,

    /// Artifact cache laid out as `<DIR>/<package>/<filename>`
    #[arg(long, value_name = "DIR")]
    pub cache: PathBuf,

    /// Fail on index entries whose filename cannot be classified
    #[arg(long)]
    pub strict: bool,
}

#[derive(clap::Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Record unreadable artifacts and keep comparing the rest
    #[arg(long)]
    pub partial: bool,

    /// Largest decompressed member read into memory
    #[arg(long, value_name = "SIZE", value_parser = parse_byte_size)]
    pub max_member_size: Option<u64>,
}

#[derive(clap::Args)]
pub struct BackendArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(clap::Args)]
pub struct ClassifyArgs {
    /// Distribution filenames
    #[arg(value_name = "FILENAME", required = true)]
    pub filenames: Vec<String>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

/// Parse byte size with optional suffix (K, M, G, T)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('T') {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}
