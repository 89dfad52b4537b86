//! CLI output formatting and display helpers.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use harvester_core::{DownloadOutcome, FailureKind, HarvestReport};
use serde::Serialize;
use tracing::info;

/// Message when no seed page or HTML file was given.
pub const NO_INPUT_GUIDANCE: &str = "No input provided. Pass one or more seed page URLs.";

/// Example for passing a seed page.
pub const INPUT_ARG_EXAMPLE: &str =
    "Example: pdf-harvester https://www.laballey.com/pages/chemical-safety-data-sheets";

/// Example for scanning a saved page.
pub const INPUT_FILE_EXAMPLE: &str =
    "Example: pdf-harvester --html-file page.html --base-url https://example.com/ --resolve-relative";

/// Returns terminal width from COLUMNS, or 80 if unset/invalid.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 20)
        .unwrap_or(80)
}

/// Truncates text to at most `width` chars, appending ellipsis if truncated.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let text_len = text.chars().count();
    if text_len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    if width == 1 {
        return "…".to_string();
    }

    let mut output: String = text.chars().take(width - 1).collect();
    output.push('…');
    output
}

/// Prints quick-start guidance to stdout when there is nothing to scan.
pub fn print_quick_start_guidance() {
    let width = terminal_width().min(80);
    for line in [NO_INPUT_GUIDANCE, INPUT_ARG_EXAMPLE, INPUT_FILE_EXAMPLE] {
        println!("{}", truncate_to_width(line, width));
    }
}

/// Prints the end-of-run summary, as text or as a JSON document.
pub(crate) fn print_completion_summary(
    report: &HarvestReport,
    output_dir: &Path,
    json: bool,
) -> Result<()> {
    info!(
        succeeded = report.succeeded(),
        skipped = report.skipped(),
        failed = report.failed(),
        total = report.total(),
        output_dir = %output_dir.display(),
        "Harvest Summary"
    );

    if json {
        println!("{}", render_json_report(report, output_dir)?);
        return Ok(());
    }

    let width = terminal_width();
    for line in render_summary_lines(report, output_dir, width) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn render_summary_lines(
    report: &HarvestReport,
    output_dir: &Path,
    width: usize,
) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Downloaded {}, skipped {}, failed {} of {} PDF link(s)",
            report.succeeded(),
            report.skipped(),
            report.failed(),
            report.total()
        ),
        truncate_to_width(&format!("Output directory: {}", output_dir.display()), width),
    ];

    if report.failed() == 0 {
        return lines;
    }

    let mut grouped: BTreeMap<FailureKind, usize> = BTreeMap::new();
    for entry in report.failures() {
        if let Some(kind) = entry.outcome.failure_kind() {
            *grouped.entry(kind).or_insert(0) += 1;
        }
    }
    let counts: Vec<String> = grouped
        .iter()
        .map(|(kind, count)| format!("{kind} {count}"))
        .collect();
    lines.push(format!("Failures ({}):", counts.join(", ")));

    for entry in report.failures() {
        if let DownloadOutcome::Failed { reason } = &entry.outcome {
            lines.push(truncate_to_width(
                &format!("  [{}] {}", reason.kind(), reason),
                width,
            ));
        }
    }
    lines
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    output_dir: String,
    succeeded: usize,
    skipped: usize,
    failed: usize,
    total: usize,
    outcomes: Vec<JsonOutcome<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonOutcome<'a> {
    url: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub(crate) fn render_json_report(report: &HarvestReport, output_dir: &Path) -> Result<String> {
    let outcomes = report
        .entries()
        .iter()
        .map(|entry| {
            let outcome = &entry.outcome;
            JsonOutcome {
                url: &entry.url,
                status: outcome.label(),
                file: outcome.file_path().map(|path| path.display().to_string()),
                bytes: match outcome {
                    DownloadOutcome::Success { bytes_written, .. } => Some(*bytes_written),
                    _ => None,
                },
                error_kind: outcome.failure_kind(),
                error: match outcome {
                    DownloadOutcome::Failed { reason } => Some(reason.to_string()),
                    _ => None,
                },
            }
        })
        .collect();

    let json = JsonReport {
        output_dir: output_dir.display().to_string(),
        succeeded: report.succeeded(),
        skipped: report.skipped(),
        failed: report.failed(),
        total: report.total(),
        outcomes,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}
