//! Build-backend probe.
//!
//! Looks for a build configuration declaring a build-system table in the
//! first source distribution of a release.

use std::ops::ControlFlow;

use tracing::debug;

use crate::CheckConfig;
use crate::HonestyError;
use crate::ReleaseRecord;
use crate::Result;
use crate::fetch::ArtifactFetcher;
use crate::formats::MemberArchive;
use crate::formats::open_archive;
use crate::report::BuildBackend;

/// Scans an opened archive for a build configuration member.
///
/// Stops at the first member whose normalized content contains
/// `config.build_system_marker`. A configuration without the marker only
/// yields [`BuildBackend::ConfigOnly`].
///
/// # Errors
///
/// Returns the reader's error if the archive or a configuration member
/// cannot be read.
pub fn scan_build_backend(
    archive: &mut dyn MemberArchive,
    config: &CheckConfig,
) -> Result<BuildBackend> {
    let marker = config.build_system_marker.as_bytes();
    let mut found = BuildBackend::Absent;

    archive.for_each_member(&mut |mut member| {
        if !member.is_file() || !config.is_build_config(member.name()) {
            return Ok(ControlFlow::Continue(()));
        }
        let config_path = member.name().to_string();
        let data = member.read_normalized(config.max_member_size)?;

        if contains(&data, marker) {
            debug!(member = %config_path, "build-system table found");
            found = BuildBackend::Pep517 { config_path };
            return Ok(ControlFlow::Break(()));
        }
        debug!(member = %config_path, "build configuration without build-system table");
        found = BuildBackend::ConfigOnly { config_path };
        Ok(ControlFlow::Continue(()))
    })?;

    Ok(found)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

/// Probes the first source distribution of `release`.
///
/// # Errors
///
/// Returns [`HonestyError::NoSourceDistributionAvailable`] if the release
/// has no source distribution, and fetch or archive errors otherwise.
pub fn probe_build_backend(
    package: &str,
    release: &ReleaseRecord,
    fetcher: &dyn ArtifactFetcher,
    config: &CheckConfig,
) -> Result<BuildBackend> {
    let sdist = release.source_dists().next().ok_or_else(|| {
        HonestyError::NoSourceDistributionAvailable {
            package: package.to_string(),
            version: release.version.clone(),
        }
    })?;

    let local = fetcher.fetch(package, sdist)?;
    let mut archive = open_archive(&local)?;
    scan_build_backend(archive.as_mut(), config)
}

/// Returns `true` if the first source distribution declares a PEP 517
/// build system.
///
/// # Errors
///
/// Same as [`probe_build_backend`].
pub fn uses_pep517_backend(
    package: &str,
    release: &ReleaseRecord,
    fetcher: &dyn ArtifactFetcher,
    config: &CheckConfig,
) -> Result<bool> {
    probe_build_backend(package, release, fetcher, config).map(|backend| backend.is_pep517())
}
