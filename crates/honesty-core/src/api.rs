//! High-level API keyed by package version.

use crate::CheckConfig;
use crate::HonestyError;
use crate::PackageRecord;
use crate::ReleaseRecord;
use crate::Result;
use crate::check::check_release;
use crate::fetch::ArtifactFetcher;
use crate::probe::probe_build_backend;
use crate::report::BuildBackend;
use crate::report::ProgressCallback;
use crate::report::ReleaseReport;

/// Looks up one release of a package.
///
/// # Errors
///
/// Returns [`HonestyError::VersionNotFound`] if the index has no such
/// version.
pub fn find_release<'a>(package: &'a PackageRecord, version: &str) -> Result<&'a ReleaseRecord> {
    package
        .release(version)
        .ok_or_else(|| HonestyError::VersionNotFound {
            package: package.name.clone(),
            version: version.to_string(),
        })
}

/// Checks one version of a package.
///
/// # Arguments
///
/// * `package` - Parsed package index
/// * `version` - Release version to check
/// * `fetcher` - Supplies local copies of the release's artifacts
/// * `config` - Check configuration
/// * `progress` - Receives per-artifact progress
///
/// # Errors
///
/// Returns [`HonestyError::VersionNotFound`] for an unknown version, and
/// otherwise whatever [`check_release`] returns.
///
/// # Examples
///
/// ```no_run
/// use honesty_core::CheckConfig;
/// use honesty_core::NoopProgress;
/// use honesty_core::check_package_version;
/// use honesty_core::fetch::CacheDir;
/// use honesty_core::index::load_index;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let package = load_index("foo", "foo.json".as_ref(), false)?;
/// let report = check_package_version(
///     &package,
///     "1.0",
///     &CacheDir::new("cache"),
///     &CheckConfig::default(),
///     &mut NoopProgress,
/// )?;
/// for path in report.problem_paths() {
///     println!("{} {:?}", path.path, path.verdict);
/// }
/// # Ok(())
/// # }
/// ```
pub fn check_package_version(
    package: &PackageRecord,
    version: &str,
    fetcher: &dyn ArtifactFetcher,
    config: &CheckConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ReleaseReport> {
    let release = find_release(package, version)?;
    check_release(&package.name, release, fetcher, config, progress)
}

/// Probes the build backend of one version of a package.
///
/// # Errors
///
/// Returns [`HonestyError::VersionNotFound`] for an unknown version and
/// [`HonestyError::NoSourceDistributionAvailable`] when the release has no
/// source distribution.
pub fn probe_package_version(
    package: &PackageRecord,
    version: &str,
    fetcher: &dyn ArtifactFetcher,
    config: &CheckConfig,
) -> Result<BuildBackend> {
    let release = find_release(package, version)?;
    probe_build_backend(&package.name, release, fetcher, config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fetch::CacheDir;
    use crate::report::NoopProgress;
    use crate::report::ReleaseVerdict;
    use crate::test_utils::ReleaseFixture;
    use tempfile::TempDir;

    fn package(temp: &TempDir) -> PackageRecord {
        let release = ReleaseFixture::new(temp.path(), "pkgA", "1.0")
            .sdist(&[("pyproject.toml", b"[build-system]\n"), ("pkgA/a.py", b"")])
            .wheel(&[("pkgA/a.py", b"")])
            .build();
        let mut package = PackageRecord::new("pkgA");
        package.releases.insert("1.0".to_string(), release);
        package
    }

    #[test]
    fn test_check_known_version() {
        let temp = TempDir::new().unwrap();
        let report = check_package_version(
            &package(&temp),
            "1.0",
            &CacheDir::new(temp.path()),
            &CheckConfig::default(),
            &mut NoopProgress,
        )
        .unwrap();
        assert_eq!(report.verdict, ReleaseVerdict::Consistent);
        assert_eq!(report.package, "pkgA");
    }

    #[test]
    fn test_unknown_version() {
        let temp = TempDir::new().unwrap();
        let err = check_package_version(
            &package(&temp),
            "2.0",
            &CacheDir::new(temp.path()),
            &CheckConfig::default(),
            &mut NoopProgress,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "version=2.0 not available for pkgA");

        let err = probe_package_version(
            &package(&temp),
            "2.0",
            &CacheDir::new(temp.path()),
            &CheckConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, HonestyError::VersionNotFound { .. }));
    }

    #[test]
    fn test_probe_known_version() {
        let temp = TempDir::new().unwrap();
        let backend = probe_package_version(
            &package(&temp),
            "1.0",
            &CacheDir::new(temp.path()),
            &CheckConfig::default(),
        )
        .unwrap();
        assert!(backend.is_pep517());
    }
}
