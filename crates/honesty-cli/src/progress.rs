//! Progress bar implementation for release checks.

use console::Term;
use honesty_core::ProgressCallback;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// Shows one tick per artifact with the artifact currently being indexed
/// when stderr is a TTY. Automatically cleans up on drop.
pub struct CliProgress {
    bar: ProgressBar,
    completed: usize,
}

impl CliProgress {
    /// Creates a new CLI progress bar. The length is set by the first
    /// `on_artifact_start`.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Text shown before the bar (e.g., "Indexing")
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        let bar = ProgressBar::new(0);

        // Template: "Indexing [████████░░░░] 2/5 foo-1.0-py3-none-any.whl"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_prefix(prefix.to_string());

        Self {
            bar,
            completed: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_artifact_start(&mut self, basename: &str, total: usize, _current: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_message(basename.to_string());
    }

    fn on_artifact_complete(&mut self, _basename: &str) {
        self.completed += 1;
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        tracing::debug!(artifacts = self.completed, "all artifacts processed");
        self.bar.finish_and_clear();
    }
}
