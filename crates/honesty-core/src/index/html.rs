//! Simple HTML index listing.
//!
//! Each file is an anchor whose `href` is `<url>/<basename>#<algo>=<hex>`,
//! optionally carrying `data-requires-python`. Anchors are scanned with
//! regular expressions; no DOM is built.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::ArtifactRecord;
use crate::HonestyError;
use crate::PackageRecord;
use crate::Result;
use crate::classify::guess_kind;
use crate::classify::guess_version;

fn anchor_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?is)<a(?:\s+((?:"[^"]*"|'[^']*'|[^'">])*?))?\s*/?>"#)
            .unwrap_or_else(|e| unreachable!("anchor pattern is a valid regex: {e}"))
    })
}

fn attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#,
        )
        .unwrap_or_else(|e| unreachable!("attribute pattern is a valid regex: {e}"))
    })
}

fn href_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r##"\A(?P<url>[^"#]+/(?P<basename>[^#]+))#(?P<checksum>[^="]+=[a-f0-9]+)\z"##)
            .unwrap_or_else(|e| unreachable!("href pattern is a valid regex: {e}"))
    })
}

/// Parses the attributes of one start tag, lowercasing names and
/// unescaping values. Valueless attributes map to `None`.
fn parse_attributes(raw: &str) -> HashMap<String, Option<String>> {
    attribute_pattern()
        .captures_iter(raw)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| unescape(m.as_str()));
            (name, value)
        })
        .collect()
}

/// Replaces HTML character references with the characters they name.
///
/// Handles the named references that appear in index attributes plus
/// decimal and hexadecimal numeric references; anything else is kept as
/// written.
///
/// # Examples
///
/// ```
/// use honesty_core::index::html::unescape;
///
/// assert_eq!(unescape("&gt;=3.6, !=3.0.*"), ">=3.6, !=3.0.*");
/// assert_eq!(unescape("&#62;=3.6&#x2c;&lt;4"), ">=3.6,<4");
/// assert_eq!(unescape("a &unknown; b"), "a &unknown; b");
/// ```
#[must_use]
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let decoded = tail
            .find(';')
            .and_then(|end| decode_reference(&tail[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(reference: &str) -> Option<char> {
    match reference {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let number = reference.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Builds an artifact record from one anchor's attributes.
fn artifact_from_attributes(attributes: &HashMap<String, Option<String>>) -> Result<ArtifactRecord> {
    let href = attributes
        .get("href")
        .and_then(Option::as_deref)
        .unwrap_or_default();
    let captures =
        href_pattern()
            .captures(href)
            .ok_or_else(|| HonestyError::UnrecognizedFilename {
                basename: href.to_string(),
            })?;

    let basename = captures["basename"].to_string();
    let kind = guess_kind(&basename)?;
    let (_, version) = guess_version(&basename)?;

    Ok(ArtifactRecord {
        url: captures["url"].to_string(),
        checksum: captures["checksum"].to_string(),
        kind,
        version,
        requires_python: attributes.get("data-requires-python").cloned().flatten(),
        python_tag: None,
        upload_time: None,
        basename,
    })
}

/// Parses a simple HTML index into a package record.
///
/// Files are grouped into releases by the version in their basename, in
/// document order. Anchors without a checksummed `href` or whose basename
/// cannot be classified are skipped, or raised when `strict` is set.
///
/// # Errors
///
/// Returns [`HonestyError::UnrecognizedFilename`] in strict mode for the
/// first anchor that cannot be turned into an artifact.
///
/// # Examples
///
/// ```
/// use honesty_core::DistributionKind;
/// use honesty_core::index::parse_simple_index;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let html = r#"
///   <a href="https://files.example/foo/foo-1.0.tar.gz#sha256=ab12"
///      data-requires-python="&gt;=3.8">foo-1.0.tar.gz</a>
/// "#;
/// let package = parse_simple_index("foo", html, false)?;
/// let release = package.release("1.0").ok_or("missing release")?;
/// assert_eq!(release.files[0].kind, DistributionKind::SourceDist);
/// assert_eq!(release.files[0].requires_python.as_deref(), Some(">=3.8"));
/// # Ok(())
/// # }
/// ```
pub fn parse_simple_index(name: &str, html: &str, strict: bool) -> Result<PackageRecord> {
    let mut package = PackageRecord::new(name);

    for anchor in anchor_pattern().captures_iter(html) {
        let attributes = parse_attributes(anchor.get(1).map_or("", |m| m.as_str()));
        match artifact_from_attributes(&attributes) {
            Ok(artifact) => {
                let version = artifact.version.clone();
                package.push_artifact(&version, artifact);
            }
            Err(e) if e.is_recoverable() && !strict => {
                tracing::debug!(error = %e, "skipping anchor");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(package)
}
