//! Precomputed tables and the two render functions.
//!
//! Everything here is built once at startup and only read afterwards.

use crate::analysis::{aggregate, build_pivot, normalize};
use crate::charts::{build_heatmap, build_radar, ChartSpec, ChartTheme};
use crate::models::{
    ColumnRange, DietGroup, FilterStats, GroupedAggregate, PivotMatrix, RawRecord,
    ReportMetadata, SummaryReport,
};
use chrono::{DateTime, Utc};
use tracing::info;

/// Settings that shape the rendered charts.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOptions {
    /// Diet group shown on the radar chart before any click.
    pub default_diet_group: DietGroup,
    pub theme: ChartTheme,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            default_diet_group: DietGroup::Meat,
            theme: ChartTheme::default(),
        }
    }
}

/// Immutable dashboard state.
#[derive(Debug, Clone)]
pub struct DashboardState {
    aggregate: GroupedAggregate,
    pivot: PivotMatrix,
    stats: FilterStats,
    ranges: Vec<ColumnRange>,
    options: DashboardOptions,
    loaded_at: DateTime<Utc>,
}

impl DashboardState {
    /// Run the full pipeline over the raw records.
    pub fn build(records: &[RawRecord], options: DashboardOptions) -> Self {
        let (mut aggregate, stats) = aggregate(records);
        let ranges = normalize(&mut aggregate);
        let pivot = build_pivot(&aggregate);

        info!(
            "Built dashboard tables: {} groups across {} diet groups ({} of {} records kept)",
            aggregate.len(),
            aggregate.diet_groups().len(),
            stats.kept,
            stats.total
        );

        Self {
            aggregate,
            pivot,
            stats,
            ranges,
            options,
            loaded_at: Utc::now(),
        }
    }

    /// Heatmap of the pivot matrix. Independent of any selection.
    pub fn render_heatmap(&self) -> ChartSpec {
        build_heatmap(&self.pivot, &self.options.theme)
    }

    /// Radar chart for the selected diet group, or the default one.
    pub fn render_radar(&self, selected: Option<&str>) -> ChartSpec {
        let label = selected.unwrap_or_else(|| self.options.default_diet_group.as_str());
        build_radar(label, &self.aggregate)
    }

    pub fn aggregate(&self) -> &GroupedAggregate {
        &self.aggregate
    }

    pub fn pivot(&self) -> &PivotMatrix {
        &self.pivot
    }

    pub fn stats(&self) -> FilterStats {
        self.stats
    }

    pub fn default_diet_group(&self) -> DietGroup {
        self.options.default_diet_group
    }

    /// Snapshot of the computed tables for reporting.
    pub fn summary(&self, data_path: &str) -> SummaryReport {
        SummaryReport {
            metadata: ReportMetadata {
                data_path: data_path.to_string(),
                generated_at: self.loaded_at,
                groups: self.aggregate.len(),
            },
            stats: self.stats,
            ranges: self.ranges.clone(),
            aggregate: self.aggregate.clone(),
            pivot: self.pivot.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_state() -> DashboardState {
    DashboardState::build(
        &crate::data::loader::sample_records(),
        DashboardOptions::default(),
    )
}
