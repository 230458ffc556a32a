//! Supply-chain consistency checks for published Python packages.
//!
//! `honesty-core` verifies that every pre-built distribution of a release
//! (wheels, eggs, installers, dumb binaries) carries the same source files
//! as the release's source distribution. Members are compared by the SHA-1
//! of their line-ending-normalized content under a logical path, so a
//! source file that differs between artifacts, or that only binary
//! artifacts ship, is reported.
//!
//! # Examples
//!
//! ```no_run
//! use honesty_core::CheckConfig;
//! use honesty_core::NoopProgress;
//! use honesty_core::check_package_version;
//! use honesty_core::fetch::CacheDir;
//! use honesty_core::index::load_index;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let package = load_index("requests", "requests.html".as_ref(), false)?;
//! let report = check_package_version(
//!     &package,
//!     "2.31.0",
//!     &CacheDir::new("/var/cache/honesty"),
//!     &CheckConfig::default(),
//!     &mut NoopProgress,
//! )?;
//! println!("{} {} {}", report.package, report.version, report.verdict);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod check;
pub mod classify;
pub mod config;
pub mod error;
pub mod fetch;
pub mod formats;
pub mod index;
pub mod indexer;
pub mod paths;
pub mod probe;
pub mod report;
#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod test_utils;
pub mod types;

// Re-export main API types
pub use api::check_package_version;
pub use api::find_release;
pub use api::probe_package_version;
pub use check::DigestAggregate;
pub use check::check_release;
pub use classify::classify;
pub use config::CheckConfig;
pub use config::FailureMode;
pub use error::HonestyError;
pub use error::Result;
pub use indexer::IndexStats;
pub use indexer::MemberDigest;
pub use indexer::index_archive;
pub use indexer::scan_archive;
pub use probe::probe_build_backend;
pub use probe::uses_pep517_backend;
pub use report::ArtifactFailure;
pub use report::BuildBackend;
pub use report::DigestGroup;
pub use report::NoopProgress;
pub use report::PathReport;
pub use report::PathVerdict;
pub use report::ProgressCallback;
pub use report::ReleaseReport;
pub use report::ReleaseVerdict;

// Re-export types module for easier access
pub use types::ArtifactRecord;
pub use types::ContentDigest;
pub use types::DistributionKind;
pub use types::PackageRecord;
pub use types::ReleaseRecord;
pub use types::digest::normalize_line_endings;
