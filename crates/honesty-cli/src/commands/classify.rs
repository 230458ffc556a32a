//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::output::Classification;
use crate::output::OutputFormatter;
use anyhow::Result;
use honesty_core::classify;

/// Classifies each filename. Exits 1 if any of them is unrecognized.
pub fn execute(args: &ClassifyArgs, formatter: &dyn OutputFormatter) -> Result<i32> {
    let results: Vec<Classification> = args
        .filenames
        .iter()
        .map(|name| Classification::new(name, classify(name)))
        .collect();

    formatter.format_classifications(&results)?;

    Ok(i32::from(results.iter().any(|c| c.error.is_some())))
}
