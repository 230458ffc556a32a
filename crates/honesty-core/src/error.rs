//! Error types for release consistency checks.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `HonestyError`.
pub type Result<T> = std::result::Result<T, HonestyError>;

/// Errors that can occur while classifying, indexing, or cross-referencing
/// the artifacts of a release.
#[derive(Error, Debug)]
pub enum HonestyError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A distribution filename matched no classification rule.
    #[error("unrecognized distribution filename: {basename}")]
    UnrecognizedFilename {
        /// The offending basename (with known suffixes removed).
        basename: String,
    },

    /// The archive container could not be opened.
    #[error("cannot open archive {archive}: {reason}")]
    ArchiveOpen {
        /// Local path of the archive.
        archive: PathBuf,
        /// Underlying reason.
        reason: String,
    },

    /// A single member of an archive could not be read.
    #[error("cannot read member {member} of {archive}: {reason}")]
    MemberRead {
        /// Local path of the archive.
        archive: PathBuf,
        /// Raw member name inside the archive.
        member: String,
        /// Underlying reason.
        reason: String,
    },

    /// A member exceeds the configured in-memory read limit.
    #[error("member {member} of {archive} is too large ({size} > {max} bytes)")]
    MemberTooLarge {
        /// Local path of the archive.
        archive: PathBuf,
        /// Raw member name inside the archive.
        member: String,
        /// Bytes seen before giving up.
        size: u64,
        /// Configured maximum.
        max: u64,
    },

    /// The requested version is not present in the package index.
    #[error("version={version} not available for {package}")]
    VersionNotFound {
        /// Package name.
        package: String,
        /// Requested version.
        version: String,
    },

    /// The release has no source distribution to probe.
    #[error("{package} {version} has no source distribution")]
    NoSourceDistributionAvailable {
        /// Package name.
        package: String,
        /// Release version.
        version: String,
    },

    /// The fetcher could not supply local bytes for an artifact.
    #[error("artifact {basename} unavailable: {reason}")]
    ArtifactUnavailable {
        /// Basename of the artifact.
        basename: String,
        /// Underlying reason.
        reason: String,
    },

    /// The package index document could not be parsed.
    #[error("invalid package index: {0}")]
    InvalidIndex(String),
}

impl HonestyError {
    /// Returns `true` for failures scoped to one artifact's archive.
    ///
    /// These are the errors that [`FailureMode::PerArtifact`] records in the
    /// report instead of aborting the release check.
    ///
    /// [`FailureMode::PerArtifact`]: crate::config::FailureMode::PerArtifact
    ///
    /// # Examples
    ///
    /// ```
    /// use honesty_core::HonestyError;
    /// use std::path::PathBuf;
    ///
    /// let err = HonestyError::ArchiveOpen {
    ///     archive: PathBuf::from("foo-1.0.tar.gz"),
    ///     reason: "bad magic".into(),
    /// };
    /// assert!(err.is_archive_failure());
    ///
    /// let err = HonestyError::InvalidIndex("truncated".into());
    /// assert!(!err.is_archive_failure());
    /// ```
    #[must_use]
    pub const fn is_archive_failure(&self) -> bool {
        matches!(
            self,
            Self::ArchiveOpen { .. }
                | Self::MemberRead { .. }
                | Self::MemberTooLarge { .. }
                | Self::ArtifactUnavailable { .. }
        )
    }

    /// Returns `true` if the caller may skip the offending input and carry on.
    ///
    /// Only filename classification failures are recoverable; index
    /// ingestion skips them in lenient mode.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnrecognizedFilename { .. })
    }

    /// Returns the archive path involved in this error, if any.
    #[must_use]
    pub fn archive(&self) -> Option<&std::path::Path> {
        match self {
            Self::ArchiveOpen { archive, .. }
            | Self::MemberRead { archive, .. }
            | Self::MemberTooLarge { archive, .. } => Some(archive),
            _ => None,
        }
    }
}
