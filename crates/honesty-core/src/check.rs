//! Cross-artifact consistency check for one release.
//!
//! Every non-`Unknown` artifact is fetched and indexed, its digests folded
//! into a [`DigestAggregate`], and each logical path classified once all
//! artifacts are in. A release without source distributions, or with
//! nothing but source distributions, exits early without fetching.

use std::collections::BTreeMap;
use std::collections::HashMap;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::ArtifactRecord;
use crate::CheckConfig;
use crate::ContentDigest;
use crate::DistributionKind;
use crate::HonestyError;
use crate::ReleaseRecord;
use crate::Result;
use crate::fetch::ArtifactFetcher;
use crate::indexer::MemberDigest;
use crate::indexer::index_archive;
use crate::report::ArtifactFailure;
use crate::report::DigestGroup;
use crate::report::PathReport;
use crate::report::PathVerdict;
use crate::report::ProgressCallback;
use crate::report::ReleaseReport;
use crate::report::ReleaseVerdict;

/// Digests of every artifact of a release, grouped by logical path.
///
/// Insertion order does not affect [`DigestAggregate::classify`]: paths are
/// sorted and source ownership is only consulted once the aggregate is
/// complete.
#[derive(Debug, Default)]
pub struct DigestAggregate {
    paths: BTreeMap<String, Vec<DigestGroup>>,
    // digest -> last logical path it was seen at in a source distribution
    source_owners: HashMap<ContentDigest, String>,
}

impl DigestAggregate {
    /// Creates an empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one member digest in.
    pub fn insert(&mut self, member: MemberDigest, from_source: bool) {
        if from_source {
            self.source_owners.insert(member.digest, member.path.clone());
        }

        let groups = self.paths.entry(member.path).or_default();
        match groups.iter_mut().find(|group| group.digest == member.digest) {
            Some(group) => {
                group.artifacts.insert(member.artifact);
            }
            None => groups.push(DigestGroup {
                digest: member.digest,
                artifacts: [member.artifact].into(),
                in_source: false,
            }),
        }
    }

    /// Folds every digest of one artifact in.
    pub fn add_artifact(&mut self, digests: Vec<MemberDigest>, from_source: bool) {
        for member in digests {
            self.insert(member, from_source);
        }
    }

    /// Number of distinct logical paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if no digest was inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Logical path a source distribution stores `digest` at, if any.
    #[must_use]
    pub fn source_owner(&self, digest: &ContentDigest) -> Option<&str> {
        self.source_owners.get(digest).map(String::as_str)
    }

    /// Classifies every path, sorted lexicographically.
    ///
    /// A path with several digests diverges; a single digest no source
    /// distribution carries (at any path) is missing from source.
    #[must_use]
    pub fn classify(self) -> Vec<PathReport> {
        let Self {
            paths,
            source_owners,
        } = self;

        paths
            .into_iter()
            .map(|(path, mut groups)| {
                for group in &mut groups {
                    group.in_source = source_owners.contains_key(&group.digest);
                }
                let verdict = match groups.as_slice() {
                    [single] if single.in_source => PathVerdict::Consistent,
                    [_] => PathVerdict::MissingFromSource,
                    _ => PathVerdict::DivergentContent,
                };
                PathReport {
                    path,
                    verdict,
                    groups,
                }
            })
            .collect()
    }
}

/// Checks that every artifact of `release` carries the same source files
/// as its source distribution.
///
/// Artifacts are processed one at a time in index order. With
/// [`FailureMode::PerArtifact`](crate::FailureMode::PerArtifact), an
/// artifact that cannot be fetched or read is recorded in
/// [`ReleaseReport::failures`] and contributes no digests; the check still
/// fails if no source distribution could be indexed at all.
///
/// # Time limits
///
/// There is no per-fetch or per-scan timeout: a slow fetcher or a huge
/// archive holds the check for as long as it takes. Callers that need a
/// bound should enforce it inside their [`ArtifactFetcher`], failing with
/// [`HonestyError::ArtifactUnavailable`] once a deadline passes (recorded
/// like any other unreadable artifact in per-artifact mode), and run the
/// whole check on a worker thread they can abandon.
///
/// # Errors
///
/// Returns the first archive or fetch error in fail-closed mode, and any
/// other error unconditionally.
///
/// # Examples
///
/// ```no_run
/// use honesty_core::CheckConfig;
/// use honesty_core::NoopProgress;
/// use honesty_core::PackageRecord;
/// use honesty_core::check_release;
/// use honesty_core::fetch::CacheDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let package = PackageRecord::new("foo");
/// let release = package.release("1.0").ok_or("no such release")?;
/// let report = check_release(
///     &package.name,
///     release,
///     &CacheDir::new("cache"),
///     &CheckConfig::default(),
///     &mut NoopProgress,
/// )?;
/// std::process::exit(report.exit_code());
/// # }
/// ```
pub fn check_release(
    package: &str,
    release: &ReleaseRecord,
    fetcher: &dyn ArtifactFetcher,
    config: &CheckConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ReleaseReport> {
    if !release.has_source_dist() {
        info!(package, version = %release.version, "no source distribution");
        return Ok(ReleaseReport::new(
            package,
            &release.version,
            ReleaseVerdict::NoSourceDistribution,
        ));
    }
    if release.is_source_only() {
        info!(package, version = %release.version, "only source distributions");
        return Ok(ReleaseReport::new(
            package,
            &release.version,
            ReleaseVerdict::SourceOnly,
        ));
    }

    let artifacts: Vec<&ArtifactRecord> = release
        .files
        .iter()
        .filter(|artifact| artifact.kind != DistributionKind::Unknown)
        .collect();
    let total = artifacts.len();

    let mut aggregate = DigestAggregate::new();
    let mut failures = Vec::new();
    let mut source_error: Option<HonestyError> = None;
    let mut sources_indexed = 0;
    let mut indexed = 0;

    for (position, artifact) in artifacts.into_iter().enumerate() {
        progress.on_artifact_start(&artifact.basename, total, position + 1);

        match index_artifact(package, artifact, fetcher, config) {
            Ok(digests) => {
                debug!(artifact = %artifact.basename, digests = digests.len(), "artifact indexed");
                aggregate.add_artifact(digests, artifact.is_source());
                indexed += 1;
                if artifact.is_source() {
                    sources_indexed += 1;
                }
            }
            Err(e) if e.is_archive_failure() && config.records_artifact_failures() => {
                warn!(artifact = %artifact.basename, error = %e, "skipping unreadable artifact");
                failures.push(ArtifactFailure {
                    basename: artifact.basename.clone(),
                    error: e.to_string(),
                });
                if artifact.is_source() && source_error.is_none() {
                    source_error = Some(e);
                }
            }
            Err(e) => return Err(e),
        }

        progress.on_artifact_complete(&artifact.basename);
    }
    progress.on_complete();

    // Without any indexed source distribution every path would read as
    // missing from source.
    if sources_indexed == 0
        && let Some(e) = source_error
    {
        return Err(e);
    }

    let paths = aggregate.classify();
    let verdict = ReleaseVerdict::worst_of(paths.iter().map(|path| path.verdict));
    info!(
        package,
        version = %release.version,
        verdict = %verdict,
        paths = paths.len(),
        failures = failures.len(),
        "release checked"
    );

    Ok(ReleaseReport {
        package: package.to_string(),
        version: release.version.clone(),
        verdict,
        paths,
        failures,
        artifacts_indexed: indexed,
    })
}

fn index_artifact(
    package: &str,
    artifact: &ArtifactRecord,
    fetcher: &dyn ArtifactFetcher,
    config: &CheckConfig,
) -> Result<Vec<MemberDigest>> {
    let local = fetcher.fetch(package, artifact)?;
    let mut digests = index_archive(&local, artifact.kind, config)?;
    // The cached file name may differ from the published one.
    for digest in &mut digests {
        digest.artifact.clone_from(&artifact.basename);
    }
    Ok(digests)
}
