//! Output formatter trait for CLI results.

use anyhow::Result;
use honesty_core::BuildBackend;
use honesty_core::DistributionKind;
use honesty_core::HonestyError;
use honesty_core::ReleaseReport;
use serde::Serialize;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the outcome of a release check
    fn format_check_result(&self, report: &ReleaseReport) -> Result<()>;

    /// Format the build-backend probe result
    fn format_backend_result(&self, package: &str, version: &str, backend: &BuildBackend)
    -> Result<()>;

    /// Format filename classifications
    fn format_classifications(&self, results: &[Classification]) -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str) -> Result<()>;
}

/// Outcome of classifying one filename.
#[derive(Debug, Serialize)]
pub struct Classification {
    pub basename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DistributionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Classification {
    pub fn new(basename: &str, result: Result<(DistributionKind, String), HonestyError>) -> Self {
        match result {
            Ok((kind, version)) => Self {
                basename: basename.to_string(),
                kind: Some(kind),
                version: Some(version),
                error: None,
            },
            Err(e) => Self {
                basename: basename.to_string(),
                kind: None,
                version: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Warning,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn warning(operation: impl Into<String>, message: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Warning,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Shortens an artifact name to `width` characters, keeping its head and
/// tail.
pub fn shorten(name: &str, width: usize) -> String {
    const HEAD: usize = 22;
    const ELLIPSIS: &str = "...";

    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= width || width < HEAD + ELLIPSIS.len() {
        return name.to_string();
    }
    let tail = width - HEAD - ELLIPSIS.len();
    let mut out: String = chars[..HEAD].iter().collect();
    out.push_str(ELLIPSIS);
    out.extend(&chars[chars.len() - tail..]);
    out
}
