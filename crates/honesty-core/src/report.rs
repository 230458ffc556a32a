//! Release check reporting.
//!
//! A [`ReleaseReport`] is plain data: verdicts, per-path evidence, and
//! recorded artifact failures. Rendering is left to the consumer.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::ContentDigest;

/// Exit-code bit set when a path is missing from the source distribution.
pub const EXIT_MISSING_FROM_SOURCE: i32 = 4;

/// Exit-code bit set when a path has divergent content.
pub const EXIT_DIVERGENT_CONTENT: i32 = 8;

/// Exit code of a release without any source distribution.
pub const EXIT_NO_SOURCE_DISTRIBUTION: i32 = 1;

/// Verdict for one logical path, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathVerdict {
    /// Every artifact agrees and the source distribution has the content.
    Consistent,
    /// Artifacts agree on one digest that no source distribution contains.
    MissingFromSource,
    /// More than one distinct digest exists for the path.
    DivergentContent,
}

impl PathVerdict {
    /// Exit-code bits contributed by this verdict.
    #[must_use]
    pub const fn exit_bits(self) -> i32 {
        match self {
            Self::Consistent => 0,
            Self::MissingFromSource => EXIT_MISSING_FROM_SOURCE,
            Self::DivergentContent => EXIT_DIVERGENT_CONTENT,
        }
    }

    /// Returns `true` for anything but [`PathVerdict::Consistent`].
    #[must_use]
    pub const fn is_problem(self) -> bool {
        !matches!(self, Self::Consistent)
    }

    /// Short human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Consistent => "OK",
            Self::MissingFromSource => "not in sdist",
            Self::DivergentContent => "different hashes",
        }
    }
}

/// Aggregate verdict for a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseVerdict {
    /// No source distribution to compare against; nothing was fetched.
    NoSourceDistribution,
    /// Only source distributions were published; nothing to cross-check.
    SourceOnly,
    /// Every compared path is consistent.
    Consistent,
    /// The worst path is missing from the source distribution.
    MissingFromSource,
    /// At least one path has divergent content.
    DivergentContent,
}

impl ReleaseVerdict {
    /// Returns the verdict for the worst path verdict observed.
    ///
    /// # Examples
    ///
    /// ```
    /// use honesty_core::PathVerdict;
    /// use honesty_core::ReleaseVerdict;
    ///
    /// let paths = [PathVerdict::MissingFromSource, PathVerdict::Consistent];
    /// assert_eq!(
    ///     ReleaseVerdict::worst_of(paths.iter().copied()),
    ///     ReleaseVerdict::MissingFromSource
    /// );
    /// assert_eq!(ReleaseVerdict::worst_of([]), ReleaseVerdict::Consistent);
    /// ```
    #[must_use]
    pub fn worst_of(verdicts: impl IntoIterator<Item = PathVerdict>) -> Self {
        match verdicts.into_iter().max() {
            None | Some(PathVerdict::Consistent) => Self::Consistent,
            Some(PathVerdict::MissingFromSource) => Self::MissingFromSource,
            Some(PathVerdict::DivergentContent) => Self::DivergentContent,
        }
    }

    /// Returns `true` if the release needs no attention.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::SourceOnly | Self::Consistent)
    }

    /// Short human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::NoSourceDistribution => "no sdist",
            Self::SourceOnly => "only sdist",
            Self::Consistent => "OK",
            Self::MissingFromSource | Self::DivergentContent => "problems",
        }
    }
}

impl fmt::Display for ReleaseVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One distinct digest seen at a path and the artifacts that carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestGroup {
    /// Content digest.
    pub digest: ContentDigest,
    /// Basenames of the contributing artifacts, sorted.
    pub artifacts: BTreeSet<String>,
    /// Whether some source distribution contains this content.
    pub in_source: bool,
}

/// Verdict and evidence for one logical path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathReport {
    /// Logical path.
    pub path: String,
    /// Verdict for the path.
    pub verdict: PathVerdict,
    /// Every distinct digest seen at the path, in first-seen order.
    pub groups: Vec<DigestGroup>,
}

impl PathReport {
    /// Basenames of every artifact that contains the path.
    #[must_use]
    pub fn artifacts(&self) -> BTreeSet<&str> {
        self.groups
            .iter()
            .flat_map(|group| group.artifacts.iter().map(String::as_str))
            .collect()
    }
}

/// An artifact that could not be fetched or read, recorded instead of
/// aborting the check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactFailure {
    /// Basename of the artifact.
    pub basename: String,
    /// Rendered error.
    pub error: String,
}

/// Result of checking one release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseReport {
    /// Package name.
    pub package: String,
    /// Release version.
    pub version: String,
    /// Aggregate verdict.
    pub verdict: ReleaseVerdict,
    /// Per-path verdicts, sorted by path.
    pub paths: Vec<PathReport>,
    /// Artifacts skipped after a failure.
    pub failures: Vec<ArtifactFailure>,
    /// Number of artifacts indexed.
    pub artifacts_indexed: usize,
}

impl ReleaseReport {
    /// Creates a report with no paths, for the early-exit verdicts.
    #[must_use]
    pub fn new(
        package: impl Into<String>,
        version: impl Into<String>,
        verdict: ReleaseVerdict,
    ) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
            verdict,
            paths: Vec::new(),
            failures: Vec::new(),
            artifacts_indexed: 0,
        }
    }

    /// Process exit code for this report.
    ///
    /// `0` when consistent or source-only, `1` without a source
    /// distribution; otherwise `4` if any path is missing from source OR-ed
    /// with `8` if any path diverges. Bit `2` is reserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use honesty_core::ReleaseReport;
    /// use honesty_core::ReleaseVerdict;
    ///
    /// let report = ReleaseReport::new("foo", "1.0", ReleaseVerdict::SourceOnly);
    /// assert_eq!(report.exit_code(), 0);
    ///
    /// let report = ReleaseReport::new("foo", "1.0", ReleaseVerdict::NoSourceDistribution);
    /// assert_eq!(report.exit_code(), 1);
    /// ```
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self.verdict {
            ReleaseVerdict::NoSourceDistribution => EXIT_NO_SOURCE_DISTRIBUTION,
            ReleaseVerdict::SourceOnly => 0,
            _ => self
                .paths
                .iter()
                .fold(0, |code, path| code | path.verdict.exit_bits()),
        }
    }

    /// Paths whose verdict is not consistent.
    pub fn problem_paths(&self) -> impl Iterator<Item = &PathReport> {
        self.paths.iter().filter(|path| path.verdict.is_problem())
    }

    /// Returns `true` if the verdict is clean and no artifact was skipped.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.verdict.is_ok() && self.failures.is_empty()
    }

    /// Returns `true` if some artifact failure was recorded.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// What the build-backend probe found in a source distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildBackend {
    /// A build configuration declaring a build-system table.
    Pep517 {
        /// Member that declares it.
        config_path: String,
    },
    /// A build configuration without a build-system table.
    ConfigOnly {
        /// Last such member seen.
        config_path: String,
    },
    /// No build configuration at all.
    Absent,
}

impl BuildBackend {
    /// Returns `true` only for [`BuildBackend::Pep517`].
    #[must_use]
    pub const fn is_pep517(&self) -> bool {
        matches!(self, Self::Pep517 { .. })
    }
}

/// Callback trait for progress reporting during a release check.
///
/// # Examples
///
/// ```
/// use honesty_core::ProgressCallback;
///
/// struct Printer;
///
/// impl ProgressCallback for Printer {
///     fn on_artifact_start(&mut self, basename: &str, total: usize, current: usize) {
///         println!("[{current}/{total}] {basename}");
///     }
///
///     fn on_artifact_complete(&mut self, _basename: &str) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called before an artifact is fetched.
    ///
    /// # Arguments
    ///
    /// * `basename` - Artifact being processed
    /// * `total` - Number of artifacts that will be processed
    /// * `current` - Current artifact number (1-indexed)
    fn on_artifact_start(&mut self, basename: &str, total: usize, current: usize);

    /// Called once an artifact is indexed or its failure recorded.
    fn on_artifact_complete(&mut self, basename: &str);

    /// Called when every artifact has been processed.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_artifact_start(&mut self, _basename: &str, _total: usize, _current: usize) {}

    fn on_artifact_complete(&mut self, _basename: &str) {}

    fn on_complete(&mut self) {}
}
