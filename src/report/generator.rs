//! Summary report generation.
//!
//! Renders the computed tables as Markdown (for `--dry-run` in a terminal)
//! or JSON.

use crate::models::{
    ColumnRange, FilterStats, GroupedAggregate, Indicator, PivotMatrix, ReportMetadata,
    SummaryReport,
};
use anyhow::Result;

/// Generate a complete Markdown summary.
pub fn generate_text_report(report: &SummaryReport) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# DietDash Summary\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_filter_section(&report.stats));
    output.push_str(&generate_ranges_section(&report.ranges));
    output.push_str(&generate_aggregate_section(&report.aggregate));
    output.push_str(&generate_pivot_section(&report.pivot));

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Data File:** `{}`\n", metadata.data_path));
    section.push_str(&format!(
        "- **Computed At:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Groups:** {}\n", metadata.groups));
    section.push('\n');

    section
}

/// Generate the filtering breakdown.
fn generate_filter_section(stats: &FilterStats) -> String {
    let mut section = String::new();

    section.push_str("## Filtering\n\n");
    section.push_str("| Records | Incomplete | Invalid Diet Group | **Kept** |\n");
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | **{}** |\n\n",
        stats.total, stats.incomplete, stats.invalid_diet_group, stats.kept
    ));

    section
}

/// Generate the pre-normalization ranges table.
fn generate_ranges_section(ranges: &[ColumnRange]) -> String {
    if ranges.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Indicator Ranges\n\n");
    section.push_str("| Indicator | Column | Min | Max |\n");
    section.push_str("|:---|:---|---:|---:|\n");

    for range in ranges {
        let note = if range.is_degenerate() {
            " (constant, scaled to 0)"
        } else {
            ""
        };
        section.push_str(&format!(
            "| {}{} | `{}` | {:.4} | {:.4} |\n",
            range.indicator.label(),
            note,
            range.indicator.column(),
            range.min,
            range.max
        ));
    }
    section.push('\n');

    section
}

/// Generate the normalized grouped table.
fn generate_aggregate_section(aggregate: &GroupedAggregate) -> String {
    let mut section = String::new();

    section.push_str("## Normalized Means by Diet Group and Sex\n\n");

    if aggregate.is_empty() {
        section.push_str("No records survived filtering.\n\n");
        return section;
    }

    section.push_str("| Diet Group | Sex | n |");
    for indicator in Indicator::ALL {
        section.push_str(&format!(" {} |", indicator.column()));
    }
    section.push_str("\n|:---|:---|---:|");
    section.push_str(&"---:|".repeat(Indicator::ALL.len()));
    section.push('\n');

    for row in &aggregate.rows {
        section.push_str(&format!("| {} | {} | {} |", row.diet_group, row.sex, row.count));
        for value in row.values {
            section.push_str(&format!(" {:.2} |", value));
        }
        section.push('\n');
    }
    section.push('\n');

    section
}

/// Generate the heatmap matrix.
fn generate_pivot_section(pivot: &PivotMatrix) -> String {
    if pivot.diet_groups.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Heatmap Matrix (mean over sex)\n\n");
    section.push_str("| Indicator |");
    for group in &pivot.diet_groups {
        section.push_str(&format!(" {} |", group));
    }
    section.push_str("\n|:---|");
    section.push_str(&"---:|".repeat(pivot.diet_groups.len()));
    section.push('\n');

    for indicator in Indicator::ALL {
        section.push_str(&format!("| {} |", indicator.column()));
        for group in &pivot.diet_groups {
            let value = pivot.value(indicator, *group).unwrap_or_default();
            section.push_str(&format!(" {:.2} |", value));
        }
        section.push('\n');
    }
    section.push('\n');

    section
}

/// Generate a JSON summary.
pub fn generate_json_report(report: &SummaryReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
