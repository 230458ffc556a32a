//! JSON output formatter for machine-readable results.

use super::formatter::Classification;
use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use honesty_core::BuildBackend;
use honesty_core::ReleaseReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    /// Renders a warning as one compact JSON line.
    fn warning_line(message: &str) -> Result<String> {
        let output = JsonOutput::<()>::warning("warning", message);
        Ok(serde_json::to_string(&output)?)
    }
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    exit_code: i32,
    #[serde(flatten)]
    report: &'a ReleaseReport,
}

#[derive(Serialize)]
struct BackendOutput<'a> {
    package: &'a str,
    version: &'a str,
    pep517: bool,
    backend: &'a BuildBackend,
}

impl OutputFormatter for JsonFormatter {
    fn format_check_result(&self, report: &ReleaseReport) -> Result<()> {
        let data = CheckOutput {
            exit_code: report.exit_code(),
            report,
        };
        Self::output(&JsonOutput::success("check", data))
    }

    fn format_backend_result(
        &self,
        package: &str,
        version: &str,
        backend: &BuildBackend,
    ) -> Result<()> {
        let data = BackendOutput {
            package,
            version,
            pep517: backend.is_pep517(),
            backend,
        };
        Self::output(&JsonOutput::success("backend", data))
    }

    fn format_classifications(&self, results: &[Classification]) -> Result<()> {
        Self::output(&JsonOutput::success("classify", results))
    }

    // Warnings go to stderr so stdout stays a single document.
    fn format_warning(&self, message: &str) -> Result<()> {
        writeln!(io::stderr(), "{}", Self::warning_line(message)?)?;
        Ok(())
    }
}
