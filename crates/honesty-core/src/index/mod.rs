//! Package index parsing.
//!
//! Two document shapes produce the same [`PackageRecord`]: the simple HTML
//! listing (one anchor per file) and the JSON API (files grouped by release
//! version). Files whose names cannot be classified are skipped unless
//! parsing is strict.

pub mod html;
pub mod json;

use std::path::Path;

use crate::PackageRecord;
use crate::Result;

pub use html::parse_simple_index;
pub use json::parse_json_index;
pub use json::parse_upload_time;

/// Index document flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    /// Simple HTML listing.
    SimpleHtml,
    /// JSON API document.
    Json,
}

impl IndexFormat {
    /// Picks the format from a file name: `.json` is JSON, anything else is
    /// HTML.
    ///
    /// # Examples
    ///
    /// ```
    /// use honesty_core::index::IndexFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(IndexFormat::from_path(Path::new("foo.json")), IndexFormat::Json);
    /// assert_eq!(IndexFormat::from_path(Path::new("foo/index.html")), IndexFormat::SimpleHtml);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            Self::Json
        } else {
            Self::SimpleHtml
        }
    }
}

/// Parses an index document of the given format.
///
/// # Errors
///
/// See [`parse_simple_index`] and [`parse_json_index`].
pub fn parse_index(
    name: &str,
    document: &str,
    format: IndexFormat,
    strict: bool,
) -> Result<PackageRecord> {
    match format {
        IndexFormat::SimpleHtml => parse_simple_index(name, document, strict),
        IndexFormat::Json => parse_json_index(name, document, strict),
    }
}

/// Reads and parses an index file, choosing the format from its name.
///
/// # Errors
///
/// Returns [`HonestyError::Io`](crate::HonestyError::Io) if the file
/// cannot be read, and parse errors otherwise.
pub fn load_index(name: &str, path: &Path, strict: bool) -> Result<PackageRecord> {
    let document = std::fs::read_to_string(path)?;
    parse_index(name, &document, IndexFormat::from_path(path), strict)
}
