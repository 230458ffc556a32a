//! Archive content indexing.
//!
//! Walks one archive, keeps members whose final path segment has an
//! extension, and hashes the line-ending-normalized content of source
//! members. Each hashed member is emitted as a [`MemberDigest`] keyed by its
//! logical path.

use std::ops::ControlFlow;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::CheckConfig;
use crate::ContentDigest;
use crate::DistributionKind;
use crate::Result;
use crate::formats::MemberArchive;
use crate::formats::open_archive;
use crate::paths::has_extension;
use crate::paths::normalize_member_path;

/// Digest of one source member of one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberDigest {
    /// Logical path (sdist root and `src/` layers removed).
    pub path: String,
    /// SHA-1 of the normalized content.
    pub digest: ContentDigest,
    /// Basename of the artifact the member came from.
    pub artifact: String,
}

/// Counters for one indexing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Members with an extension in their final path segment.
    pub members_seen: usize,
    /// Members whose content was hashed.
    pub members_hashed: usize,
}

/// Streams the digests of an opened archive to `sink`, one member at a
/// time.
///
/// # Errors
///
/// Returns the reader's error if the container or a member cannot be read;
/// digests already passed to `sink` stay delivered.
pub fn scan_archive(
    archive: &mut dyn MemberArchive,
    artifact: &str,
    kind: DistributionKind,
    config: &CheckConfig,
    sink: &mut dyn FnMut(MemberDigest),
) -> Result<IndexStats> {
    let is_source = kind.is_source();
    let mut stats = IndexStats::default();

    archive.for_each_member(&mut |mut member| {
        let name = member.name();
        if !has_extension(name) {
            return Ok(ControlFlow::Continue(()));
        }
        stats.members_seen += 1;

        // Only source members are hashed; other extensions are enumerated
        // and skipped.
        if !member.is_file() || !config.is_source_member(name) {
            return Ok(ControlFlow::Continue(()));
        }

        let path = normalize_member_path(name, is_source).to_string();
        let data = member.read_normalized(config.max_member_size)?;
        stats.members_hashed += 1;
        sink(MemberDigest {
            path,
            digest: ContentDigest::of(&data),
            artifact: artifact.to_string(),
        });
        Ok(ControlFlow::Continue(()))
    })?;

    debug!(
        artifact,
        format = archive.format_name(),
        seen = stats.members_seen,
        hashed = stats.members_hashed,
        "indexed archive"
    );
    Ok(stats)
}

/// Indexes the archive at `path`, collecting every member digest.
///
/// The artifact name recorded in each digest is the file name of `path`.
///
/// # Errors
///
/// Returns [`HonestyError::ArchiveOpen`](crate::HonestyError::ArchiveOpen)
/// if the container cannot be opened and
/// [`HonestyError::MemberRead`](crate::HonestyError::MemberRead) or
/// [`HonestyError::MemberTooLarge`](crate::HonestyError::MemberTooLarge)
/// for an unreadable member.
///
/// # Examples
///
/// ```no_run
/// use honesty_core::CheckConfig;
/// use honesty_core::DistributionKind;
/// use honesty_core::index_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let digests = index_archive(
///     "cache/foo/foo-1.0.tar.gz".as_ref(),
///     DistributionKind::SourceDist,
///     &CheckConfig::default(),
/// )?;
/// for member in digests {
///     println!("{} {}", member.digest, member.path);
/// }
/// # Ok(())
/// # }
/// ```
pub fn index_archive(
    path: &Path,
    kind: DistributionKind,
    config: &CheckConfig,
) -> Result<Vec<MemberDigest>> {
    let artifact = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut archive = open_archive(path)?;

    let mut digests = Vec::new();
    scan_archive(archive.as_mut(), &artifact, kind, config, &mut |digest| {
        digests.push(digest);
    })?;
    Ok(digests)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::HonestyError;
    use crate::test_utils::TarTestBuilder;
    use crate::test_utils::ZipTestBuilder;
    use crate::test_utils::gzip;
    use tempfile::TempDir;

    fn sdist(temp: &TempDir) -> std::path::PathBuf {
        let tar = TarTestBuilder::new()
            .add_directory("pkgA-1.0/")
            .add_file("pkgA-1.0/setup.py", b"from setuptools import setup\r\nsetup()\r\n")
            .add_file("pkgA-1.0/src/pkgA/__init__.py", b"x=1\n")
            .add_file("pkgA-1.0/README.rst", b"readme\n")
            .add_file("pkgA-1.0/LICENSE", b"MIT\n")
            .build();
        let path = temp.path().join("pkgA-1.0.tar.gz");
        std::fs::write(&path, gzip(&tar)).unwrap();
        path
    }

    #[test]
    fn test_sdist_paths_are_normalized() {
        let temp = TempDir::new().unwrap();
        let path = sdist(&temp);
        let mut digests =
            index_archive(&path, DistributionKind::SourceDist, &CheckConfig::default()).unwrap();
        digests.sort_by(|a, b| a.path.cmp(&b.path));

        let paths: Vec<&str> = digests.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["pkgA/__init__.py", "setup.py"]);
        assert!(digests.iter().all(|d| d.artifact == "pkgA-1.0.tar.gz"));
        assert_eq!(
            digests[1].digest,
            ContentDigest::of(b"from setuptools import setup\nsetup()\n")
        );
    }

    #[test]
    fn test_stats_count_seen_and_hashed() {
        let temp = TempDir::new().unwrap();
        let path = sdist(&temp);
        let mut archive = open_archive(&path).unwrap();
        let mut count = 0;
        let stats = scan_archive(
            archive.as_mut(),
            "pkgA-1.0.tar.gz",
            DistributionKind::SourceDist,
            &CheckConfig::default(),
            &mut |_| count += 1,
        )
        .unwrap();

        // README.rst is seen but not hashed; LICENSE is not seen at all.
        assert_eq!(stats.members_hashed, 2);
        assert_eq!(count, 2);
        assert_eq!(stats.members_seen, 3);
    }

    #[test]
    fn test_wheel_paths_are_raw() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pkgA-1.0-py3-none-any.whl");
        let whl = ZipTestBuilder::new()
            .add_file("pkgA/__init__.py", b"x=1\r\n")
            .add_file("pkgA-1.0.dist-info/METADATA", b"Name: pkgA\n")
            .build();
        std::fs::write(&path, whl).unwrap();

        let digests =
            index_archive(&path, DistributionKind::BdistWheel, &CheckConfig::default()).unwrap();
        assert_eq!(digests.len(), 1);
        assert_eq!(digests[0].path, "pkgA/__init__.py");
        assert_eq!(digests[0].digest, ContentDigest::of(b"x=1\n"));
    }

    #[test]
    fn test_custom_source_suffix() {
        let temp = TempDir::new().unwrap();
        let path = sdist(&temp);
        let config = CheckConfig {
            source_suffix: ".rst".to_string(),
            ..Default::default()
        };
        let digests = index_archive(&path, DistributionKind::SourceDist, &config).unwrap();
        assert_eq!(digests.len(), 1);
        assert_eq!(digests[0].path, "README.rst");
    }

    #[test]
    fn test_member_size_limit() {
        let temp = TempDir::new().unwrap();
        let path = sdist(&temp);
        let config = CheckConfig {
            max_member_size: 4,
            ..Default::default()
        };
        let err = index_archive(&path, DistributionKind::SourceDist, &config).unwrap_err();
        assert!(matches!(err, HonestyError::MemberTooLarge { .. }));
        assert!(err.is_archive_failure());
    }

    #[test]
    fn test_unopenable_archive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pkgA-1.0.tar.gz");
        std::fs::write(&path, b"definitely not an archive").unwrap();
        let err =
            index_archive(&path, DistributionKind::SourceDist, &CheckConfig::default()).unwrap_err();
        assert!(matches!(err, HonestyError::ArchiveOpen { .. }));
    }
}
