//! Scan summary formatting
//!
//! Formats a review's statistics and per-kind record counts for terminal
//! output.

use crate::services::ScanReport;

/// Format a scan report as a two-section table
pub fn format_scan_summary(report: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str("Scan Summary\n");
    output.push_str("============\n");
    output.push_str(&format!("  Window starts:     {}\n", report.threshold));
    output.push_str(&format!("  Files scanned:     {}\n", report.files_scanned));
    output.push_str(&format!("  Events:            {}\n", report.events));
    output.push_str(&format!("  Out of window:     {}\n", report.out_of_window));
    output.push_str(&format!("  Not important:     {}\n", report.unimportant));
    output.push_str(&format!("  Non-update events: {}\n", report.inert));
    output.push_str(&format!("  Audited events:    {}\n", report.audited));

    if report.non_normalized_timestamps > 0 {
        output.push_str(&format!(
            "  Odd timestamps:    {}\n",
            report.non_normalized_timestamps
        ));
    }

    if !report.extraction_failures.is_empty() {
        output.push_str(&format!(
            "  Skipped events:    {}\n",
            report.extraction_failures.len()
        ));
        for path in &report.extraction_failures {
            output.push_str(&format!("    - {}\n", path.display()));
        }
    }

    output.push('\n');

    if report.records_by_kind.is_empty() {
        output.push_str("No audit records emitted.\n");
        return output;
    }

    let kind_width = report
        .records_by_kind
        .keys()
        .map(|kind| kind.as_str().len())
        .max()
        .unwrap_or(4)
        .max(4);

    output.push_str(&format!(
        "{:<kind_width$}  {:>7}\n",
        "Kind",
        "Records",
        kind_width = kind_width,
    ));
    output.push_str(&format!(
        "{:-<kind_width$}  {:->7}\n",
        "",
        "",
        kind_width = kind_width,
    ));

    for (kind, count) in &report.records_by_kind {
        output.push_str(&format!(
            "{:<kind_width$}  {:>7}\n",
            kind.as_str(),
            count,
            kind_width = kind_width,
        ));
    }

    output.push_str(&format!(
        "{:-<kind_width$}  {:->7}\n",
        "",
        "",
        kind_width = kind_width,
    ));
    output.push_str(&format!(
        "{:<kind_width$}  {:>7}\n",
        "TOTAL",
        report.records_emitted(),
        kind_width = kind_width,
    ));

    output
}
