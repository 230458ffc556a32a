//! Test utilities for building release fixtures.
//!
//! In-memory tar/zip builders plus [`ReleaseFixture`], which writes a set of
//! artifacts into a cache directory laid out the way
//! [`CacheDir`](crate::fetch::CacheDir) expects and returns the matching
//! [`ReleaseRecord`].
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::ArtifactRecord;
use crate::ReleaseRecord;
use crate::classify::classify;

/// Creates an in-memory TAR archive from a list of entries.
///
/// Each entry is a tuple of (path, content). Files are created with mode 0o644.
///
/// # Examples
///
/// ```
/// use honesty_core::test_utils::create_test_tar;
///
/// let tar_data = create_test_tar(vec![("foo-1.0/setup.py", b"setup()\n")]);
/// ```
#[must_use]
pub fn create_test_tar(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(TarTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Creates an in-memory ZIP archive from a list of entries.
///
/// Each entry is a tuple of (path, content). Files are stored uncompressed.
///
/// # Examples
///
/// ```
/// use honesty_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(vec![("foo/__init__.py", b"x=1\n")]);
/// ```
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(ZipTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Gzip-compresses `data`.
#[must_use]
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Bzip2-compresses `data`.
#[must_use]
pub fn bzip2(data: &[u8]) -> Vec<u8> {
    let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Builder for TAR test archives.
///
/// # Examples
///
/// ```
/// use honesty_core::test_utils::TarTestBuilder;
///
/// let tar_data = TarTestBuilder::new()
///     .add_directory("foo-1.0/")
///     .add_file("foo-1.0/setup.py", b"setup()\n")
///     .add_symlink("foo-1.0/link.py", "setup.py")
///     .build();
/// ```
pub struct TarTestBuilder {
    builder: tar::Builder<Vec<u8>>,
}

impl TarTestBuilder {
    /// Creates a new TAR test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    /// Adds a regular file to the archive.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        self.builder.append_data(&mut header, path, data).unwrap();
        self
    }

    /// Adds a directory to the archive.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o755);
        header.set_entry_type(tar::EntryType::Directory);
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Adds a symlink to the archive.
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o777);
        header.set_entry_type(tar::EntryType::Symlink);
        header.set_link_name(target).unwrap();
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Builds and returns the TAR archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.builder.into_inner().unwrap()
    }
}

impl Default for TarTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for ZIP test archives.
///
/// # Examples
///
/// ```
/// use honesty_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_directory("foo/")
///     .add_file("foo/__init__.py", b"x=1\n")
///     .build();
/// ```
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a stored (uncompressed) file to the archive.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_with_method(path, data, zip::CompressionMethod::Stored)
    }

    /// Adds a deflate-compressed file to the archive.
    #[must_use]
    pub fn add_deflated_file(self, path: &str, data: &[u8]) -> Self {
        self.add_with_method(path, data, zip::CompressionMethod::Deflated)
    }

    fn add_with_method(mut self, path: &str, data: &[u8], method: zip::CompressionMethod) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default()
            .compression_method(method)
            .unix_permissions(0o644);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory to the archive.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Builds and returns the ZIP archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes release artifacts into `<cache>/<package>/` and records them.
///
/// # Examples
///
/// ```
/// use honesty_core::test_utils::ReleaseFixture;
///
/// let cache = std::env::temp_dir().join("honesty-doc-fixture");
/// let release = ReleaseFixture::new(&cache, "pkgA", "1.0")
///     .sdist(&[("pkgA/__init__.py", b"x=1\n")])
///     .wheel(&[("pkgA/__init__.py", b"x=1\r\n")])
///     .build();
/// assert_eq!(release.files.len(), 2);
/// # std::fs::remove_dir_all(&cache).ok();
/// ```
pub struct ReleaseFixture {
    dir: PathBuf,
    package: String,
    release: ReleaseRecord,
}

impl ReleaseFixture {
    /// Starts a fixture for `package` `version` under the cache root.
    #[must_use]
    pub fn new(cache: &Path, package: &str, version: &str) -> Self {
        let dir = cache.join(package);
        std::fs::create_dir_all(&dir).unwrap();
        Self {
            dir,
            package: package.to_string(),
            release: ReleaseRecord::new(version),
        }
    }

    /// Adds a gzipped tarball sdist; `files` are relative to the
    /// `<package>-<version>/` root directory.
    #[must_use]
    pub fn sdist(self, files: &[(&str, &[u8])]) -> Self {
        let root = format!("{}-{}", self.package, self.release.version);
        let mut builder = TarTestBuilder::new().add_directory(&format!("{root}/"));
        for (path, data) in files {
            builder = builder.add_file(&format!("{root}/{path}"), data);
        }
        let basename = format!("{root}.tar.gz");
        self.artifact(&basename, &gzip(&builder.build()))
    }

    /// Adds a pure-Python wheel holding `files` at their raw paths.
    #[must_use]
    pub fn wheel(self, files: &[(&str, &[u8])]) -> Self {
        let basename = format!(
            "{}-{}-py3-none-any.whl",
            self.package, self.release.version
        );
        let data = create_test_zip(files.to_vec());
        self.artifact(&basename, &data)
    }

    /// Writes arbitrary bytes under `basename` and lists the artifact.
    #[must_use]
    pub fn artifact(self, basename: &str, data: &[u8]) -> Self {
        std::fs::write(self.dir.join(basename), data).unwrap();
        self.listed(basename)
    }

    /// Lists an artifact without writing it to the cache.
    #[must_use]
    pub fn listed(mut self, basename: &str) -> Self {
        let (kind, version) = classify(basename).unwrap();
        self.release.files.push(ArtifactRecord {
            url: format!("https://files.example/{}/{basename}", self.package),
            basename: basename.to_string(),
            checksum: "sha256=00".to_string(),
            kind,
            version,
            requires_python: None,
            python_tag: None,
            upload_time: None,
        });
        self
    }

    /// Returns the recorded release.
    #[must_use]
    pub fn build(self) -> ReleaseRecord {
        self.release
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DistributionKind;
    use std::io::Read;

    #[test]
    fn test_create_test_tar() {
        let tar_data = create_test_tar(vec![("file.py", b"hello")]);
        assert!(!tar_data.is_empty());
    }

    #[test]
    fn test_compressors_round_trip() {
        let mut out = Vec::new();
        flate2::read::GzDecoder::new(&gzip(b"abc")[..])
            .read_to_end(&mut out)
            .unwrap();
        assert_eq!(out, b"abc");

        out.clear();
        bzip2::read::BzDecoder::new(&bzip2(b"abc")[..])
            .read_to_end(&mut out)
            .unwrap();
        assert_eq!(out, b"abc");
    }

    #[test]
    fn test_release_fixture_layout() {
        let temp = tempfile::TempDir::new().unwrap();
        let release = ReleaseFixture::new(temp.path(), "pkgA", "1.0")
            .sdist(&[("pkgA/__init__.py", b"x=1\n")])
            .wheel(&[("pkgA/__init__.py", b"x=1\n")])
            .listed("pkgA-1.0-py3-none-any.whl.asc")
            .build();

        let kinds: Vec<DistributionKind> = release.files.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DistributionKind::SourceDist,
                DistributionKind::BdistWheel,
                DistributionKind::Unknown
            ]
        );
        assert!(temp.path().join("pkgA/pkgA-1.0.tar.gz").is_file());
        assert!(temp.path().join("pkgA/pkgA-1.0-py3-none-any.whl").is_file());
        assert!(!temp.path().join("pkgA/pkgA-1.0-py3-none-any.whl.asc").exists());
    }
}
