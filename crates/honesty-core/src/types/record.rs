//! Package, release, and artifact records.

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;

use super::DistributionKind;

/// One published file of a release.
///
/// `kind` and `version` are derived from `basename` alone; see
/// [`classify`](crate::classify::classify).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactRecord {
    /// Where the bytes can be downloaded from.
    pub url: String,
    /// Final path segment of `url`; unique within a release.
    pub basename: String,
    /// Declared `<algorithm>=<hexdigest>`. Never verified here.
    pub checksum: String,
    /// Classified distribution kind.
    pub kind: DistributionKind,
    /// Version the file belongs to.
    pub version: String,
    /// `Requires-Python` specifier, e.g. `>=3.8`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_python: Option<String>,
    /// Python tag, e.g. `py3` or `source`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python_tag: Option<String>,
    /// Upload timestamp, when the index provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_time: Option<DateTime<Utc>>,
}

impl ArtifactRecord {
    /// Returns `true` if this artifact is a source distribution.
    #[must_use]
    pub const fn is_source(&self) -> bool {
        self.kind.is_source()
    }
}

/// All files published for one version of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRecord {
    /// Version string as published.
    pub version: String,
    /// Files in index order.
    pub files: Vec<ArtifactRecord>,
}

impl ReleaseRecord {
    /// Creates an empty release.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            files: Vec::new(),
        }
    }

    /// Returns the source distributions, in index order.
    pub fn source_dists(&self) -> impl Iterator<Item = &ArtifactRecord> {
        self.files.iter().filter(|file| file.is_source())
    }

    /// Returns `true` if at least one source distribution exists.
    #[must_use]
    pub fn has_source_dist(&self) -> bool {
        self.source_dists().next().is_some()
    }

    /// Returns `true` if every file is a source distribution.
    ///
    /// An empty release is not source-only.
    #[must_use]
    pub fn is_source_only(&self) -> bool {
        !self.files.is_empty() && self.files.iter().all(ArtifactRecord::is_source)
    }
}

/// A package and its releases keyed by version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    /// Package name as requested.
    pub name: String,
    /// Releases keyed by version string.
    pub releases: BTreeMap<String, ReleaseRecord>,
}

impl PackageRecord {
    /// Creates a package with no releases.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            releases: BTreeMap::new(),
        }
    }

    /// Appends an artifact to the release named by `version`, creating the
    /// release on first sight.
    pub fn push_artifact(&mut self, version: &str, artifact: ArtifactRecord) {
        self.releases
            .entry(version.to_string())
            .or_insert_with(|| ReleaseRecord::new(version))
            .files
            .push(artifact);
    }

    /// Looks up one release.
    #[must_use]
    pub fn release(&self, version: &str) -> Option<&ReleaseRecord> {
        self.releases.get(version)
    }
}
