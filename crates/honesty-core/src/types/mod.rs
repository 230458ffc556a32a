//! Data model for packages, releases, and their published artifacts.
//!
//! Records are created once by an index parser and never mutated; every
//! check borrows them.

pub mod digest;
pub mod dist_kind;
pub mod record;

pub use digest::ContentDigest;
pub use dist_kind::DistributionKind;
pub use record::ArtifactRecord;
pub use record::PackageRecord;
pub use record::ReleaseRecord;
