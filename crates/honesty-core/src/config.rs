//! Configuration for release consistency checks.

/// What to do when one artifact of a release cannot be opened or read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Abort the whole release check with the artifact's error.
    #[default]
    FailClosed,
    /// Record the failure in the report and compare the remaining artifacts.
    PerArtifact,
}

/// Settings shared by the indexer, the cross-reference engine, and the
/// build-backend probe.
///
/// Pass by reference (`&CheckConfig`); checks never mutate it, so one value
/// can serve concurrent checks of different releases.
///
/// # Examples
///
/// ```
/// use honesty_core::CheckConfig;
/// use honesty_core::FailureMode;
///
/// let config = CheckConfig::default();
/// assert_eq!(config.source_suffix, ".py");
///
/// let custom = CheckConfig {
///     max_member_size: 8 * 1024 * 1024,
///     failure_mode: FailureMode::PerArtifact,
///     ..Default::default()
/// };
/// assert!(custom.records_artifact_failures());
/// ```
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Member suffix whose content is hashed and cross-referenced.
    pub source_suffix: String,

    /// Member suffix inspected by the build-backend probe.
    pub build_config_name: String,

    /// Literal text marking a PEP 517 build-system table.
    pub build_system_marker: String,

    /// Handling of per-artifact archive failures.
    pub failure_mode: FailureMode,

    /// Maximum decompressed size of a single member read into memory.
    pub max_member_size: u64,

    /// Raise on unrecognized filenames while parsing an index instead of
    /// skipping them.
    pub strict_filenames: bool,
}

impl Default for CheckConfig {
    /// Default values:
    /// - `source_suffix`: `.py`
    /// - `build_config_name`: `pyproject.toml`
    /// - `build_system_marker`: `[build-system]`
    /// - `failure_mode`: fail closed
    /// - `max_member_size`: 50 MB
    /// - `strict_filenames`: false (lenient)
    fn default() -> Self {
        Self {
            source_suffix: ".py".to_string(),
            build_config_name: "pyproject.toml".to_string(),
            build_system_marker: "[build-system]".to_string(),
            failure_mode: FailureMode::FailClosed,
            max_member_size: 50 * 1024 * 1024, // 50 MB
            strict_filenames: false,
        }
    }
}

impl CheckConfig {
    /// Configuration that records unreadable artifacts instead of aborting.
    #[must_use]
    pub fn partial() -> Self {
        Self {
            failure_mode: FailureMode::PerArtifact,
            ..Default::default()
        }
    }

    /// Configuration that rejects unrecognized filenames during index
    /// parsing.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict_filenames: true,
            ..Default::default()
        }
    }

    /// Returns `true` if archive failures are recorded per artifact.
    #[must_use]
    pub fn records_artifact_failures(&self) -> bool {
        self.failure_mode == FailureMode::PerArtifact
    }

    /// Returns `true` if the member's content participates in
    /// cross-referencing.
    #[must_use]
    pub fn is_source_member(&self, name: &str) -> bool {
        name.ends_with(self.source_suffix.as_str())
    }

    /// Returns `true` if the member is a build configuration file.
    #[must_use]
    pub fn is_build_config(&self, name: &str) -> bool {
        name.ends_with(self.build_config_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CheckConfig::default();
        assert_eq!(config.failure_mode, FailureMode::FailClosed);
        assert!(!config.strict_filenames);
        assert_eq!(config.max_member_size, 50 * 1024 * 1024);
        assert!(!config.records_artifact_failures());
    }

    #[test]
    fn test_partial_config() {
        let config = CheckConfig::partial();
        assert!(config.records_artifact_failures());
        assert_eq!(config.source_suffix, ".py");
    }

    #[test]
    fn test_strict_config() {
        let config = CheckConfig::strict();
        assert!(config.strict_filenames);
        assert_eq!(config.failure_mode, FailureMode::FailClosed);
    }

    #[test]
    fn test_member_predicates() {
        let config = CheckConfig::default();
        assert!(config.is_source_member("pkg/__init__.py"));
        assert!(!config.is_source_member("pkg/__init__.pyc"));
        assert!(!config.is_source_member("pkg/data.txt"));
        assert!(config.is_build_config("foo-1.0/pyproject.toml"));
        assert!(!config.is_build_config("foo-1.0/setup.cfg"));
    }
}
