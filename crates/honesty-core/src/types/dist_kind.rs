//! Distribution kind enumeration.

use serde::Serialize;
use std::fmt;

/// Kind of a published distribution file.
///
/// Mirrors the `packagetype` vocabulary of the package index, plus
/// `Unknown` for files that are not distributable archives (signatures,
/// metadata files). Only variant identity matters; ordinal values carry no
/// meaning.
///
/// # Examples
///
/// ```
/// use honesty_core::DistributionKind;
///
/// assert!(DistributionKind::SourceDist.is_source());
/// assert!(DistributionKind::BdistWheel.is_binary());
/// assert!(!DistributionKind::Unknown.is_binary());
/// assert_eq!(DistributionKind::BdistWheel.to_string(), "bdist_wheel");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionKind {
    /// Not a recognized distributable archive.
    Unknown,
    /// Source distribution (`.tar.gz`, `.zip`, `.tar.bz2`).
    #[serde(rename = "sdist")]
    SourceDist,
    /// macOS disk image (`.dmg`).
    BdistDmg,
    /// Platform-tagged binary tarball or zip.
    BdistDumb,
    /// Egg (`.egg`).
    BdistEgg,
    /// Windows installer package (`.msi`).
    BdistMsi,
    /// RPM package (`.rpm`).
    BdistRpm,
    /// Wheel (`.whl`).
    BdistWheel,
    /// Windows self-extracting installer (`.exe`).
    BdistWininst,
}

impl DistributionKind {
    /// Returns `true` for source distributions.
    #[must_use]
    pub const fn is_source(self) -> bool {
        matches!(self, Self::SourceDist)
    }

    /// Returns `true` for every pre-built distribution kind.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        !matches!(self, Self::SourceDist | Self::Unknown)
    }

    /// Returns the index vocabulary name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::SourceDist => "sdist",
            Self::BdistDmg => "bdist_dmg",
            Self::BdistDumb => "bdist_dumb",
            Self::BdistEgg => "bdist_egg",
            Self::BdistMsi => "bdist_msi",
            Self::BdistRpm => "bdist_rpm",
            Self::BdistWheel => "bdist_wheel",
            Self::BdistWininst => "bdist_wininst",
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
