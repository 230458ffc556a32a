//! Logical member paths.
//!
//! Packaging tools put sdist contents under a `<project>-<version>/` root
//! directory, and many projects keep their code under `src/`. Wheels and
//! other binary distributions store files relative to the install root.
//! Stripping those layers from sdist members makes the same source file
//! compare equal across artifacts.

/// Maps a raw archive member name to its cross-artifact comparison key.
///
/// For source distributions, everything up to and including the first `/`
/// is removed, then a leading `src/` if present. Other paths are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use honesty_core::paths::normalize_member_path;
///
/// assert_eq!(normalize_member_path("foo-1.0/src/foo/mod.py", true), "foo/mod.py");
/// assert_eq!(normalize_member_path("foo-1.0/foo/mod.py", true), "foo/mod.py");
/// assert_eq!(normalize_member_path("foo/mod.py", false), "foo/mod.py");
/// assert_eq!(normalize_member_path("setup.py", true), "setup.py");
/// ```
#[must_use]
pub fn normalize_member_path(raw: &str, is_source_dist: bool) -> &str {
    if !is_source_dist {
        return raw;
    }
    match raw.split_once('/') {
        Some((_, rest)) => rest.strip_prefix("src/").unwrap_or(rest),
        None => raw,
    }
}

/// Returns `true` if the final path segment contains a `.`.
///
/// Directories and extension-less entries never take part in
/// cross-referencing.
///
/// # Examples
///
/// ```
/// use honesty_core::paths::has_extension;
///
/// assert!(has_extension("foo/__init__.py"));
/// assert!(!has_extension("foo/"));
/// assert!(!has_extension("foo/LICENSE"));
/// ```
#[must_use]
pub fn has_extension(name: &str) -> bool {
    name.rsplit('/').next().is_some_and(|last| last.contains('.'))
}
