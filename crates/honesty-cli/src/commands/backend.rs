//! Backend command implementation.

use super::load_package;
use crate::cli::BackendArgs;
use crate::error::add_release_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use honesty_core::CheckConfig;
use honesty_core::fetch::CacheDir;
use honesty_core::probe_package_version;

/// Probes the first sdist of the release. Exits 0 when a build-system
/// table was found and 1 otherwise.
pub fn execute(args: &BackendArgs, formatter: &dyn OutputFormatter) -> Result<i32> {
    let config = CheckConfig {
        strict_filenames: args.source.strict,
        ..Default::default()
    };
    let package = load_package(&args.source, &config)?;
    let cache = CacheDir::new(&args.source.cache);

    let backend = add_release_context(
        probe_package_version(&package, &args.source.version, &cache, &config),
        &args.source.package,
        &args.source.version,
    )?;

    formatter.format_backend_result(&args.source.package, &args.source.version, &backend)?;

    Ok(i32::from(!backend.is_pep517()))
}
