//! Error conversion utilities for CLI.
//!
//! Converts honesty-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use honesty_core::HonestyError;
use std::path::Path;

/// Converts `HonestyError` to a user-friendly anyhow error for one release.
pub fn convert_release_error(err: HonestyError, package: &str, version: &str) -> anyhow::Error {
    match err {
        HonestyError::VersionNotFound { .. } => {
            anyhow!(
                "{err}\n\
                 HINT: Check that the index file lists files for version {version}."
            )
        }
        HonestyError::NoSourceDistributionAvailable { .. } => {
            anyhow!("{package} {version} has no source distribution")
        }
        HonestyError::ArtifactUnavailable { ref basename, .. } => {
            anyhow!(
                "{err}\n\
                 HINT: Download {basename} into the cache directory under {package}/."
            )
        }
        HonestyError::MemberTooLarge { .. } => {
            anyhow!(
                "{package} {version}: {err}\n\
                 HINT: Raise the limit with --max-member-size, or use --partial to skip the artifact."
            )
        }
        HonestyError::ArchiveOpen { .. } | HonestyError::MemberRead { .. } => {
            anyhow!(
                "{package} {version}: {err}\n\
                 HINT: Use --partial to record unreadable artifacts and compare the rest."
            )
        }
        _ => anyhow::Error::from(err).context(format!("Error checking {package} {version}")),
    }
}

/// Converts an index loading error.
pub fn convert_index_error(err: HonestyError, index: &Path) -> anyhow::Error {
    match err {
        HonestyError::Io(io_err) => {
            anyhow!("Cannot read index '{}': {io_err}", index.display())
        }
        HonestyError::InvalidIndex(reason) => {
            anyhow!(
                "Invalid index '{}': {reason}\n\
                 HINT: Files ending in .json are read as the JSON API; anything else as simple HTML.",
                index.display()
            )
        }
        HonestyError::UnrecognizedFilename { .. } => {
            anyhow!(
                "{err} in index '{}'\n\
                 HINT: Drop --strict to skip unrecognized files.",
                index.display()
            )
        }
        _ => anyhow::Error::from(err).context(format!("Error loading index '{}'", index.display())),
    }
}

/// Adds release context to a core result.
pub fn add_release_context<T>(
    result: Result<T, HonestyError>,
    package: &str,
    version: &str,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_release_error(e, package, version))
}

/// Adds index context to a core result.
pub fn add_index_context<T>(result: Result<T, HonestyError>, index: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_index_error(e, index))
}
