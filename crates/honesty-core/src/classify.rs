//! Distribution classification from filenames.
//!
//! Classification is a pure function of the basename: no network or
//! filesystem access. Single-extension binary formats are recognized by
//! suffix first; only names ending in a source-distribution suffix go
//! through the `<package>-<version>[<platform>]-<rest>` pattern, where a
//! platform marker identifies a `bdist_dumb` tarball that would otherwise
//! look like an sdist.

use regex::Regex;
use std::sync::OnceLock;

use crate::DistributionKind;
use crate::HonestyError;
use crate::Result;

/// Suffixes that mark a source distribution (or a `bdist_dumb` disguised
/// as one).
pub const SDIST_EXTENSIONS: [&str; 3] = [".tar.gz", ".zip", ".tar.bz2"];

/// Suffixes stripped, in this order, before matching the version pattern.
///
/// Compound suffixes such as `.tar.gz` are removed because `.gz` precedes
/// `.tar` in the list.
const STRIPPED_SUFFIXES: [&str; 10] = [
    ".egg", ".whl", ".zip", ".gz", ".bz2", ".tar", ".exe", ".msi", ".rpm", ".dmg",
];

/// Single-extension kinds, checked in priority order.
const SUFFIX_KINDS: [(&str, DistributionKind); 6] = [
    (".egg", DistributionKind::BdistEgg),
    (".whl", DistributionKind::BdistWheel),
    (".exe", DistributionKind::BdistWininst),
    (".msi", DistributionKind::BdistMsi),
    (".rpm", DistributionKind::BdistRpm),
    (".dmg", DistributionKind::BdistDmg),
];

/// `<package>-<version>` followed by an optional platform marker and/or a
/// trailing `-anything`.
///
/// - `package`: shortest prefix followed by `-` and a digit
/// - `version`: digit-leading run without `-`, as short as possible
/// - `platform`: `.macosx`, `.linux`, `.cygwin`, `.win32`, `.winxp`, `.win`
/// - `suffix`: platform marker plus the `-...` tail
fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?P<package>.*?)-(?P<version>[0-9][^-]*?)(?P<suffix>(?P<platform>\.macosx|\.linux|\.cygwin|\.win(?:32|xp|))?-.*)?$",
        )
        .unwrap_or_else(|e| unreachable!("version pattern is a valid regex: {e}"))
    })
}

/// Strips every known distribution suffix from `basename`.
///
/// # Examples
///
/// ```
/// use honesty_core::classify::remove_suffix;
///
/// assert_eq!(remove_suffix("foo-1.0.tar.gz"), "foo-1.0");
/// assert_eq!(remove_suffix("foo-1.0-py3-none-any.whl"), "foo-1.0-py3-none-any");
/// assert_eq!(remove_suffix("foo-1.0.tar.gz.asc"), "foo-1.0.tar.gz.asc");
/// ```
#[must_use]
pub fn remove_suffix(basename: &str) -> &str {
    let mut name = basename;
    for suffix in STRIPPED_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            name = stripped;
        }
    }
    name
}

/// Returns `true` if the name ends in a source-distribution suffix.
#[must_use]
pub fn has_sdist_suffix(basename: &str) -> bool {
    SDIST_EXTENSIONS
        .iter()
        .any(|suffix| basename.ends_with(suffix))
}

/// Determines the distribution kind of a file from its basename.
///
/// # Errors
///
/// Returns [`HonestyError::UnrecognizedFilename`] when a name with a
/// source-distribution suffix does not match the version pattern.
///
/// # Examples
///
/// ```
/// use honesty_core::DistributionKind;
/// use honesty_core::classify::guess_kind;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// assert_eq!(guess_kind("foo-1.0.tar.gz")?, DistributionKind::SourceDist);
/// assert_eq!(guess_kind("foo-1.0.linux-x86_64.tar.gz")?, DistributionKind::BdistDumb);
/// assert_eq!(guess_kind("foo-1.0.tar.gz.asc")?, DistributionKind::Unknown);
/// # Ok(())
/// # }
/// ```
pub fn guess_kind(basename: &str) -> Result<DistributionKind> {
    if let Some((_, kind)) = SUFFIX_KINDS
        .iter()
        .find(|(suffix, _)| basename.ends_with(suffix))
    {
        return Ok(*kind);
    }

    if !has_sdist_suffix(basename) {
        return Ok(DistributionKind::Unknown);
    }

    let stem = remove_suffix(basename);
    let captures =
        version_pattern()
            .captures(stem)
            .ok_or_else(|| HonestyError::UnrecognizedFilename {
                basename: stem.to_string(),
            })?;

    if captures.name("platform").is_some() {
        return Ok(DistributionKind::BdistDumb);
    }
    if captures
        .name("suffix")
        .is_some_and(|suffix| suffix.as_str().starts_with("-macosx"))
    {
        return Ok(DistributionKind::BdistDumb);
    }
    Ok(DistributionKind::SourceDist)
}

/// Extracts `(package, version)` from a distribution basename.
///
/// # Errors
///
/// Returns [`HonestyError::UnrecognizedFilename`] when the name does not
/// match the version pattern.
///
/// # Examples
///
/// ```
/// use honesty_core::classify::guess_version;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (package, version) = guess_version("foo_bar-2.0.1-py3-none-any.whl")?;
/// assert_eq!(package, "foo_bar");
/// assert_eq!(version, "2.0.1");
/// # Ok(())
/// # }
/// ```
pub fn guess_version(basename: &str) -> Result<(String, String)> {
    let stem = remove_suffix(basename);
    let captures =
        version_pattern()
            .captures(stem)
            .ok_or_else(|| HonestyError::UnrecognizedFilename {
                basename: stem.to_string(),
            })?;

    let package = captures.name("package").map_or("", |m| m.as_str());
    let version = captures.name("version").map_or("", |m| m.as_str());
    Ok((package.to_string(), version.to_string()))
}

/// Classifies a basename into its distribution kind and declared version.
///
/// `Unknown` files whose name carries no parsable version yield an empty
/// version instead of an error; every other kind requires one.
///
/// # Errors
///
/// Returns [`HonestyError::UnrecognizedFilename`] when a distributable
/// file's name does not match the version pattern.
///
/// # Examples
///
/// ```
/// use honesty_core::DistributionKind;
/// use honesty_core::classify;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// assert_eq!(
///     classify("foo-1.2.3-win32.exe")?,
///     (DistributionKind::BdistWininst, "1.2.3".to_string())
/// );
/// # Ok(())
/// # }
/// ```
pub fn classify(basename: &str) -> Result<(DistributionKind, String)> {
    let kind = guess_kind(basename)?;
    match guess_version(basename) {
        Ok((_, version)) => Ok((kind, version)),
        Err(_) if kind == DistributionKind::Unknown => Ok((kind, String::new())),
        Err(e) => Err(e),
    }
}
