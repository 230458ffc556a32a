//! Artifact fetching.
//!
//! The engine only needs a local path for each artifact. Downloading and
//! checksum verification belong to the caller's fetcher.

use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use crate::ArtifactRecord;
use crate::HonestyError;
use crate::Result;

/// Supplies a local, readable copy of an artifact.
///
/// Implementations must be safe to call once per artifact in any order.
pub trait ArtifactFetcher {
    /// Returns the local path holding the bytes of `artifact`.
    ///
    /// # Errors
    ///
    /// Returns [`HonestyError::ArtifactUnavailable`] if the bytes cannot be
    /// supplied.
    fn fetch(&self, package: &str, artifact: &ArtifactRecord) -> Result<PathBuf>;
}

/// A pre-populated cache laid out as `<root>/<package>/<basename>`.
///
/// Never downloads: a file absent from the cache is unavailable.
///
/// # Examples
///
/// ```
/// use honesty_core::fetch::CacheDir;
///
/// let cache = CacheDir::new("/var/cache/honesty");
/// assert_eq!(
///     cache.artifact_path("foo", "foo-1.0.tar.gz"),
///     std::path::Path::new("/var/cache/honesty/foo/foo-1.0.tar.gz")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CacheDir {
    root: PathBuf,
}

impl CacheDir {
    /// Creates a cache rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location an artifact is expected at.
    #[must_use]
    pub fn artifact_path(&self, package: &str, basename: &str) -> PathBuf {
        self.root.join(package).join(basename)
    }
}

impl ArtifactFetcher for CacheDir {
    fn fetch(&self, package: &str, artifact: &ArtifactRecord) -> Result<PathBuf> {
        // Basenames come from the index; refuse anything that would leave
        // the package directory.
        if artifact.basename.is_empty()
            || artifact.basename.contains(['/', '\\'])
            || artifact.basename == ".."
        {
            return Err(HonestyError::ArtifactUnavailable {
                basename: artifact.basename.clone(),
                reason: "not a plain file name".to_string(),
            });
        }

        let path = self.artifact_path(package, &artifact.basename);
        if !path.is_file() {
            return Err(HonestyError::ArtifactUnavailable {
                basename: artifact.basename.clone(),
                reason: format!("not cached at {}", path.display()),
            });
        }
        debug!(artifact = %artifact.basename, path = %path.display(), "cache hit");
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::DistributionKind;
    use tempfile::TempDir;

    fn record(basename: &str) -> ArtifactRecord {
        ArtifactRecord {
            url: format!("https://files.example/foo/{basename}"),
            basename: basename.to_string(),
            checksum: "sha256=00".to_string(),
            kind: DistributionKind::SourceDist,
            version: "1.0".to_string(),
            requires_python: None,
            python_tag: None,
            upload_time: None,
        }
    }

    #[test]
    fn test_cached_file_is_returned() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("foo")).unwrap();
        std::fs::write(temp.path().join("foo/foo-1.0.tar.gz"), b"x").unwrap();

        let cache = CacheDir::new(temp.path());
        let path = cache.fetch("foo", &record("foo-1.0.tar.gz")).unwrap();
        assert_eq!(path, temp.path().join("foo").join("foo-1.0.tar.gz"));
        assert_eq!(cache.root(), temp.path());
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let cache = CacheDir::new(temp.path());
        let err = cache.fetch("foo", &record("foo-1.0.tar.gz")).unwrap_err();
        assert!(matches!(err, HonestyError::ArtifactUnavailable { .. }));
        assert!(err.is_archive_failure());
    }

    #[test]
    fn test_path_like_basename_is_rejected() {
        let temp = TempDir::new().unwrap();
        let cache = CacheDir::new(temp.path());
        for basename in ["../escape.tar.gz", "a/b.whl", "..", ""] {
            assert!(matches!(
                cache.fetch("foo", &record(basename)),
                Err(HonestyError::ArtifactUnavailable { .. })
            ));
        }
    }
}
