//! Human-readable output formatter with colors and styling.

use super::formatter::Classification;
use super::formatter::OutputFormatter;
use super::formatter::shorten;
use anyhow::Result;
use console::Term;
use console::style;
use honesty_core::BuildBackend;
use honesty_core::PathReport;
use honesty_core::PathVerdict;
use honesty_core::ReleaseReport;

/// Display width of artifact names in verbose listings.
const NAME_WIDTH: usize = 50;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            term: Term::stdout(),
        }
    }

    /// Lines describing one path; consistent paths only appear when verbose.
    fn path_lines(path: &PathReport, verbose: bool) -> Vec<String> {
        let mut lines = Vec::new();
        match path.verdict {
            PathVerdict::Consistent => {
                if verbose {
                    lines.push(style(format!("  {}: OK", path.path)).green().to_string());
                }
            }
            PathVerdict::MissingFromSource | PathVerdict::DivergentContent => {
                lines.push(
                    style(format!("  {} {}", path.path, path.verdict.description()))
                        .red()
                        .to_string(),
                );
                if verbose {
                    for group in &path.groups {
                        for artifact in &group.artifacts {
                            let line =
                                format!("    {}: {}", shorten(artifact, NAME_WIDTH), group.digest);
                            // Only divergent content marks the odd ones out.
                            let flagged = path.verdict == PathVerdict::DivergentContent
                                && !group.in_source;
                            lines.push(if flagged {
                                style(line).red().to_string()
                            } else {
                                style(line).yellow().to_string()
                            });
                        }
                    }
                }
            }
        }
        lines
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_check_result(&self, report: &ReleaseReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for path in &report.paths {
            for line in Self::path_lines(path, self.verbose) {
                self.term.write_line(&line)?;
            }
        }

        let summary = format!("{} {} {}", report.package, report.version, report.verdict);
        let summary = if report.verdict.is_ok() {
            style(summary).green()
        } else {
            style(summary).yellow()
        };
        self.term.write_line(&summary.to_string())?;

        if self.verbose {
            self.term.write_line(&format!(
                "  {} artifacts indexed, {} paths compared",
                report.artifacts_indexed,
                report.paths.len()
            ))?;
        }

        Ok(())
    }

    fn format_backend_result(
        &self,
        package: &str,
        version: &str,
        backend: &BuildBackend,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let line = match backend {
            BuildBackend::Pep517 { config_path } => {
                style(format!("{package} build-system {config_path}")).green()
            }
            BuildBackend::ConfigOnly { config_path } => {
                style(format!("{package} has-toml {config_path}")).yellow()
            }
            BuildBackend::Absent => style(format!("{package} {version} no build configuration")),
        };
        self.term.write_line(&line.to_string())?;
        Ok(())
    }

    fn format_classifications(&self, results: &[Classification]) -> Result<()> {
        for result in results {
            match (&result.kind, &result.version, &result.error) {
                (Some(kind), Some(version), _) => {
                    if !self.quiet {
                        self.term
                            .write_line(&format!("{}  {kind}  {version}", result.basename))?;
                    }
                }
                (_, _, error) => self.format_warning(&format!(
                    "{}: {}",
                    result.basename,
                    error.as_deref().unwrap_or("unrecognized")
                ))?,
            }
        }
        Ok(())
    }

    fn format_warning(&self, message: &str) -> Result<()> {
        Term::stderr().write_line(&format!("{} {message}", style("⚠").yellow().bold()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use honesty_core::ContentDigest;
    use honesty_core::DigestGroup;
    use std::collections::BTreeSet;

    fn group(content: &[u8], artifacts: &[&str], in_source: bool) -> DigestGroup {
        DigestGroup {
            digest: ContentDigest::of(content),
            artifacts: artifacts.iter().map(ToString::to_string).collect::<BTreeSet<_>>(),
            in_source,
        }
    }

    #[test]
    fn test_consistent_path_hidden_unless_verbose() {
        let path = PathReport {
            path: "foo/__init__.py".to_string(),
            verdict: PathVerdict::Consistent,
            groups: vec![group(b"x", &["foo-1.0.tar.gz"], true)],
        };
        assert!(HumanFormatter::path_lines(&path, false).is_empty());
        let lines = HumanFormatter::path_lines(&path, true);
        assert_eq!(lines.len(), 1);
        assert!(console::strip_ansi_codes(&lines[0]).contains("foo/__init__.py: OK"));
    }

    #[test]
    fn test_divergent_path_lists_artifacts_when_verbose() {
        let path = PathReport {
            path: "foo/__init__.py".to_string(),
            verdict: PathVerdict::DivergentContent,
            groups: vec![
                group(b"x=1\n", &["foo-1.0.tar.gz"], true),
                group(b"x=2\n", &["foo-1.0-py3-none-any.whl"], false),
            ],
        };
        let terse = HumanFormatter::path_lines(&path, false);
        assert_eq!(terse.len(), 1);
        assert!(console::strip_ansi_codes(&terse[0]).contains("different hashes"));

        let lines = HumanFormatter::path_lines(&path, true);
        assert_eq!(lines.len(), 3);
        let wheel_line = console::strip_ansi_codes(&lines[2]).to_string();
        assert!(wheel_line.contains("foo-1.0-py3-none-any.whl"));
        assert!(wheel_line.contains(&ContentDigest::of(b"x=2\n").to_hex()));
    }
}
