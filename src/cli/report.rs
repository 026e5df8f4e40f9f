//! Text and JSON rendering of run and dry-run results

use super::Output;
use crate::walker::{DryRunReport, RunReport};
use anyhow::Result;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, serde::Serialize)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON format
    Json,
}

pub fn print_dry_run(report: &DryRunReport, format: OutputFormat, output: &Output) -> Result<()> {
    if format == OutputFormat::Json {
        output.raw(&serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let kind = if report.is_dir { "directory" } else { "file" };
    match &report.reason {
        None if report.included => {
            output.success(&format!("{} {} would be included", kind, report.path))
        }
        Some(reason) => output.warning(&format!(
            "{} {} would be excluded ({})",
            kind, report.path, reason
        )),
        None => output.warning(&format!("{} {} would be excluded", kind, report.path)),
    }
    output.key_value("Includes:", &report.include_patterns.join(" "), false);
    output.key_value("Excludes:", &report.exclude_patterns.join(" "), false);
    Ok(())
}

pub fn print_run_report(report: &RunReport, format: OutputFormat, output: &Output) -> Result<()> {
    if format == OutputFormat::Json {
        output.raw(&serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let stats = &report.stats;
    output.success(&format!(
        "Processing complete. {} file(s) written to {}",
        stats.files_included,
        report.destinations.join(", ")
    ));

    output.summary_stats("Directories included:", stats.directories_included);
    output.summary_stats("Directories excluded:", stats.directories_excluded);
    output.summary_stats("Files excluded:", stats.files_excluded);
    output.summary_stats("Files failed:", stats.files_failed);
    output.summary_stats("Bytes written:", stats.bytes_written);
    output.summary_stats("Chunks written:", stats.chunks_written);
    output.summary_stats("Elapsed (ms):", stats.duration_ms);

    if !report.warnings.is_empty() {
        output.info(&format!("{} warning(s):", report.warnings.len()));
        for warning in &report.warnings {
            output.warning(&format!("[{}] {}", warning.category, warning.message));
        }
    }
    Ok(())
}
