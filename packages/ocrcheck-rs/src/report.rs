//! Presentation of comparison results. Scoring never prints; everything user facing is built here.
use std::fmt::Write as _;
use std::path::Path;

use chrono::Utc;
use clap::ValueEnum;
use serde::Serialize;

use crate::comparator::{AggregateReport, ComparisonReport, ElementComparison};
use crate::element::TextElement;
use crate::error::Result;

/// Offsets at or below this many pixels are treated as noise and not printed.
const OFFSET_REPORT_THRESHOLD: f64 = 2.0;
const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    reference: &'a Path,
    image: &'a Path,
    report: &'a ComparisonReport,
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn write_element(out: &mut String, comp: &ElementComparison) {
    let _ = writeln!(out, "Element {}:", comp.index + 1);
    let _ = writeln!(
        out,
        "Text: '{}' -> '{}'",
        comp.reference_text, comp.current_text
    );
    let _ = writeln!(out, "Text similarity: {}", percent(comp.text_similarity));
    if comp.coord_diff > OFFSET_REPORT_THRESHOLD {
        let _ = writeln!(out, "Offset: {:.1} px", comp.coord_diff);
    }
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
}

fn write_summary(out: &mut String, aggregate: &AggregateReport) {
    let _ = writeln!(out, "\nSummary:");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(
        out,
        "Mean text similarity: {}",
        percent(aggregate.mean_text_similarity)
    );
    let _ = writeln!(
        out,
        "Mean coordinate score: {}",
        percent(aggregate.mean_coord_score)
    );
    let _ = writeln!(out, "Overall accuracy: {}", percent(aggregate.overall_accuracy));
}

/// Human readable report: one block per pair, the summary, then a count warning if needed.
pub fn render_text(report: &ComparisonReport) -> String {
    let mut out = String::from("Detailed comparison:\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');

    for comp in &report.comparisons {
        write_element(&mut out, comp);
    }

    if let Some(aggregate) = &report.aggregate {
        write_summary(&mut out, aggregate);
    }

    if let Some(diff) = report.length_mismatch {
        let _ = writeln!(out, "\nWarning: element count differs (difference: {diff})");
    }

    out
}

pub fn render_json(report: &ComparisonReport, reference: &Path, image: &Path) -> Result<String> {
    let json = JsonReport {
        generated_at: Utc::now().to_rfc3339(),
        reference,
        image,
        report,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

pub fn render(
    report: &ComparisonReport,
    format: ReportFormat,
    reference: &Path,
    image: &Path,
) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Json => render_json(report, reference, image),
    }
}

/// Elements in the reference file layout.
pub fn render_elements_json(elements: &[TextElement]) -> Result<String> {
    Ok(serde_json::to_string_pretty(elements)?)
}
