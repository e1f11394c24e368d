pub mod diff;
pub mod show;

use anyhow::Context;
use clap::ValueEnum;
use std::path::Path;

/// Exit status for `--fail-on-diff` when differences were found.
pub const EXIT_DIFFERENCES: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown-style summary
    Text,
    /// Structured result as pretty-printed JSON
    Json,
}

/// Write a report to `output`, or to stdout when no file is given.
pub fn emit(report: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, report)
            .with_context(|| format!("write report to {}", path.display())),
        None => {
            print!("{}", report);
            Ok(())
        }
    }
}

pub fn to_json<T: serde::Serialize>(value: &T) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("serialize report")?;
    json.push('\n');
    Ok(json)
}
