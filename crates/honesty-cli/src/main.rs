//! Honesty CLI - Command-line auditor that checks whether the binary
//! distributions of a PyPI release match its source distribution.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();

    init_tracing(cli.json, cli.verbose);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = !cli.quiet && !cli.json;

    let code = match &cli.command {
        cli::Commands::Check(args) => commands::check::execute(args, &*formatter, show_progress)?,
        cli::Commands::Backend(args) => commands::backend::execute(args, &*formatter)?,
        cli::Commands::Classify(args) => commands::classify::execute(args, &*formatter)?,
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            0
        }
    };

    Ok(ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX)))
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set. JSON mode keeps stderr quiet so that scripted
/// consumers only see the document on stdout and real errors.
fn init_tracing(json: bool, verbose: bool) {
    let default = if json {
        "off"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}
