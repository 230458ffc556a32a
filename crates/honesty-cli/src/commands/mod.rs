//! Subcommand implementations.
//!
//! Each `execute` returns the process exit code on success.

pub mod backend;
pub mod check;
pub mod classify;
pub mod completion;

use crate::cli::SourceArgs;
use crate::error::add_index_context;
use anyhow::Result;
use honesty_core::CheckConfig;
use honesty_core::PackageRecord;
use honesty_core::index::load_index;

/// Loads the package index named on the command line.
fn load_package(source: &SourceArgs, config: &CheckConfig) -> Result<PackageRecord> {
    add_index_context(
        load_index(&source.package, &source.index, config.strict_filenames),
        &source.index,
    )
}
