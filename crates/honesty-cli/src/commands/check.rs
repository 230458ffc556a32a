//! Check command implementation.

use super::load_package;
use crate::cli::CheckArgs;
use crate::error::add_release_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use honesty_core::CheckConfig;
use honesty_core::FailureMode;
use honesty_core::NoopProgress;
use honesty_core::check_package_version;
use honesty_core::fetch::CacheDir;

pub fn execute(args: &CheckArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<i32> {
    let config = build_config(args);
    let package = load_package(&args.source, &config)?;
    let cache = CacheDir::new(&args.source.cache);

    let result = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Indexing");
        check_package_version(&package, &args.source.version, &cache, &config, &mut progress)
    } else {
        check_package_version(&package, &args.source.version, &cache, &config, &mut NoopProgress)
    };
    let report = add_release_context(result, &args.source.package, &args.source.version)?;

    for failure in &report.failures {
        formatter.format_warning(&format!("{}: {}", failure.basename, failure.error))?;
    }
    formatter.format_check_result(&report)?;

    Ok(report.exit_code())
}

fn build_config(args: &CheckArgs) -> CheckConfig {
    let defaults = CheckConfig::default();
    CheckConfig {
        failure_mode: if args.partial {
            FailureMode::PerArtifact
        } else {
            FailureMode::FailClosed
        },
        strict_filenames: args.source.strict,
        max_member_size: args.max_member_size.unwrap_or(defaults.max_member_size),
        ..defaults
    }
}
