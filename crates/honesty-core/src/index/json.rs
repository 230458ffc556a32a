//! JSON API index document.

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::NaiveDateTime;
use chrono::Timelike;
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use crate::ArtifactRecord;
use crate::HonestyError;
use crate::PackageRecord;
use crate::ReleaseRecord;
use crate::Result;
use crate::classify::guess_kind;

#[derive(Debug, Deserialize)]
struct JsonIndex {
    releases: BTreeMap<String, Vec<JsonFile>>,
}

#[derive(Debug, Deserialize)]
struct JsonFile {
    url: String,
    filename: String,
    digests: JsonDigests,
    #[serde(default)]
    requires_python: Option<String>,
    #[serde(default)]
    python_version: Option<String>,
    #[serde(default)]
    upload_time_iso_8601: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JsonDigests {
    sha256: String,
}

/// Parses an ISO 8601 upload timestamp as UTC.
///
/// Fractional seconds are optional (older uploads have none) and are kept
/// to microsecond precision. A trailing `Z` is accepted.
///
/// # Errors
///
/// Returns [`HonestyError::InvalidIndex`] for anything else.
///
/// # Examples
///
/// ```
/// use honesty_core::index::parse_upload_time;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let t = parse_upload_time("2019-01-30T22:10:16.123456789Z")?;
/// assert_eq!(t.to_rfc3339(), "2019-01-30T22:10:16.123456+00:00");
/// let t = parse_upload_time("2008-11-02T15:04:05")?;
/// assert_eq!(t.to_rfc3339(), "2008-11-02T15:04:05+00:00");
/// # Ok(())
/// # }
/// ```
pub fn parse_upload_time(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim_end_matches('Z');
    let (seconds, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    let invalid = || HonestyError::InvalidIndex(format!("bad upload time: {value}"));
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let micros: u32 = format!("{:0<6}", &fraction[..fraction.len().min(6)])
        .parse()
        .map_err(|_| invalid())?;

    let naive = NaiveDateTime::parse_from_str(seconds, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| invalid())?;
    let naive = naive
        .with_nanosecond(micros * 1_000)
        .ok_or_else(invalid)?;
    Ok(naive.and_utc())
}

/// Parses a JSON API document into a package record.
///
/// Releases are keyed by the document's version keys, including releases
/// with no files. The file kind is derived from the filename rather than
/// the index's own package type. Unclassifiable files are skipped unless
/// `strict` is set.
///
/// # Errors
///
/// Returns [`HonestyError::InvalidIndex`] if the document does not have the
/// expected shape or carries a bad timestamp, and
/// [`HonestyError::UnrecognizedFilename`] in strict mode.
///
/// # Examples
///
/// ```
/// use honesty_core::index::parse_json_index;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let json = r#"{"releases": {"1.0": [{
///     "url": "https://files.example/foo/foo-1.0.tar.gz",
///     "filename": "foo-1.0.tar.gz",
///     "digests": {"sha256": "ab12"},
///     "requires_python": null,
///     "upload_time_iso_8601": "2020-01-01T00:00:00.000000Z"
/// }]}}"#;
/// let package = parse_json_index("foo", json, false)?;
/// assert_eq!(package.releases["1.0"].files[0].checksum, "sha256=ab12");
/// # Ok(())
/// # }
/// ```
pub fn parse_json_index(name: &str, json: &str, strict: bool) -> Result<PackageRecord> {
    let index: JsonIndex =
        serde_json::from_str(json).map_err(|e| HonestyError::InvalidIndex(e.to_string()))?;

    let mut package = PackageRecord::new(name);
    for (version, files) in index.releases {
        let mut release = ReleaseRecord::new(version.as_str());
        for file in files {
            let kind = match guess_kind(&file.filename) {
                Ok(kind) => kind,
                Err(e) if e.is_recoverable() && !strict => {
                    debug!(error = %e, "skipping file");
                    continue;
                }
                Err(e) => return Err(e),
            };
            let upload_time = file
                .upload_time_iso_8601
                .as_deref()
                .map(parse_upload_time)
                .transpose()?;

            release.files.push(ArtifactRecord {
                url: file.url,
                basename: file.filename,
                checksum: format!("sha256={}", file.digests.sha256),
                kind,
                version: version.clone(),
                requires_python: file.requires_python,
                python_tag: file.python_version,
                upload_time,
            });
        }
        package.releases.insert(version, release);
    }
    Ok(package)
}
