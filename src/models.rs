//! Data models for the dashboard.
//!
//! This module contains the core data structures shared by the loader,
//! the aggregation pipeline, the chart builders and the summary report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of indicator columns carried through the pipeline.
pub const INDICATOR_COUNT: usize = 5;

/// One of the five environmental-impact indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Indicator {
    /// Methane-equivalent greenhouse gas emissions
    #[serde(rename = "mean_ghgs_ch4")]
    GhgsCh4,
    /// Acidification
    #[serde(rename = "mean_acid")]
    Acid,
    /// Eutrophication
    #[serde(rename = "mean_eut")]
    Eut,
    /// Water scarcity
    #[serde(rename = "mean_watscar")]
    WatScar,
    /// Biodiversity impact
    #[serde(rename = "mean_bio")]
    Bio,
}

impl Indicator {
    /// All indicators, in column order.
    pub const ALL: [Indicator; INDICATOR_COUNT] = [
        Indicator::GhgsCh4,
        Indicator::Acid,
        Indicator::Eut,
        Indicator::WatScar,
        Indicator::Bio,
    ];

    /// Column name in the source table.
    pub fn column(&self) -> &'static str {
        match self {
            Indicator::GhgsCh4 => "mean_ghgs_ch4",
            Indicator::Acid => "mean_acid",
            Indicator::Eut => "mean_eut",
            Indicator::WatScar => "mean_watscar",
            Indicator::Bio => "mean_bio",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Indicator::GhgsCh4 => "Methane emissions",
            Indicator::Acid => "Acidification",
            Indicator::Eut => "Eutrophication",
            Indicator::WatScar => "Water scarcity",
            Indicator::Bio => "Biodiversity impact",
        }
    }

    /// Position of this indicator in value arrays.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// A valid diet group. Rows with any other label are excluded before grouping.
///
/// Variants are declared in the lexical order of their labels, which is the
/// column order of the heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietGroup {
    Fish,
    Meat,
    Meat100,
    Meat50,
    Vegan,
    Veggie,
}

impl DietGroup {
    /// All valid diet groups.
    pub const ALL: [DietGroup; 6] = [
        DietGroup::Fish,
        DietGroup::Meat,
        DietGroup::Meat100,
        DietGroup::Meat50,
        DietGroup::Vegan,
        DietGroup::Veggie,
    ];

    /// Label as it appears in the source table and on the charts.
    pub fn as_str(&self) -> &'static str {
        match self {
            DietGroup::Fish => "fish",
            DietGroup::Meat => "meat",
            DietGroup::Meat50 => "meat50",
            DietGroup::Meat100 => "meat100",
            DietGroup::Vegan => "vegan",
            DietGroup::Veggie => "veggie",
        }
    }

    /// Exact match against the source table label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.as_str() == label)
    }

    /// Lenient parse for user input. Surrounding whitespace and case are ignored.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|group| group.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for DietGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the source table, as read. Nulls are kept as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    /// Self-reported diet group label (not yet validated).
    pub diet_group: Option<String>,
    /// Sex label.
    pub sex: Option<String>,
    /// Indicator values, indexed by `Indicator::index()`.
    pub values: [Option<f64>; INDICATOR_COUNT],
}

impl RawRecord {
    /// Value of a single indicator, if present.
    pub fn value(&self, indicator: Indicator) -> Option<f64> {
        self.values[indicator.index()]
    }
}

/// Per-(diet group, sex) aggregate row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedRow {
    pub diet_group: DietGroup,
    pub sex: String,
    /// Number of raw records that contributed to this row.
    pub count: usize,
    /// Indicator means; normalized in place once the normalizer has run.
    pub values: [f64; INDICATOR_COUNT],
}

impl GroupedRow {
    /// Value of a single indicator.
    pub fn value(&self, indicator: Indicator) -> f64 {
        self.values[indicator.index()]
    }
}

/// The grouped table: exactly one row per observed (diet group, sex) pair,
/// ordered by diet group then sex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedAggregate {
    pub rows: Vec<GroupedRow>,
}

impl GroupedAggregate {
    pub fn new(rows: Vec<GroupedRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows belonging to one diet group, in sex order.
    pub fn rows_for(&self, diet_group: DietGroup) -> impl Iterator<Item = &GroupedRow> {
        self.rows
            .iter()
            .filter(move |row| row.diet_group == diet_group)
    }

    /// Distinct diet groups present, in enum order.
    pub fn diet_groups(&self) -> Vec<DietGroup> {
        let mut groups: Vec<DietGroup> = self.rows.iter().map(|r| r.diet_group).collect();
        groups.sort();
        groups.dedup();
        groups
    }

    /// Values of one indicator column across all rows.
    pub fn column(&self, indicator: Indicator) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row.value(indicator))
    }
}

/// Counts of what happened to the raw rows during filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    /// Rows read from the source table.
    pub total: usize,
    /// Rows dropped for a null indicator, diet group or sex.
    pub incomplete: usize,
    /// Rows dropped for a diet group outside the valid set.
    pub invalid_diet_group: usize,
    /// Rows that reached the grouping stage.
    pub kept: usize,
}

/// Observed range of one indicator column before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub indicator: Indicator,
    pub min: f64,
    pub max: f64,
}

impl ColumnRange {
    /// A column whose values are all equal cannot be min-max scaled.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }
}

/// Indicator × diet-group matrix of normalized values, averaged over sex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotMatrix {
    /// Column keys.
    pub diet_groups: Vec<DietGroup>,
    /// One row per indicator (in `Indicator::ALL` order), one cell per diet group.
    pub values: Vec<Vec<f64>>,
}

impl PivotMatrix {
    /// Cell lookup. `None` when the diet group is not a column.
    pub fn value(&self, indicator: Indicator, diet_group: DietGroup) -> Option<f64> {
        let col = self.diet_groups.iter().position(|g| *g == diet_group)?;
        self.values.get(indicator.index())?.get(col).copied()
    }

    /// Row labels (indicator column names).
    pub fn indicator_labels(&self) -> Vec<String> {
        Indicator::ALL.iter().map(|i| i.column().to_string()).collect()
    }

    /// Column labels (diet group names).
    pub fn diet_group_labels(&self) -> Vec<String> {
        self.diet_groups.iter().map(|g| g.as_str().to_string()).collect()
    }
}

/// Metadata about a summary report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the source table.
    pub data_path: String,
    /// When the tables were computed.
    pub generated_at: DateTime<Utc>,
    /// Number of (diet group, sex) groups.
    pub groups: usize,
}

/// A snapshot of the computed tables, for `--dry-run` and `/api/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub metadata: ReportMetadata,
    pub stats: FilterStats,
    pub ranges: Vec<ColumnRange>,
    pub aggregate: GroupedAggregate,
    pub pivot: PivotMatrix,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diet_group_parse() {
        assert_eq!(DietGroup::parse("vegan"), Some(DietGroup::Vegan));
        assert_eq!(DietGroup::parse(" Meat100 "), Some(DietGroup::Meat100));
        assert_eq!(DietGroup::parse("MEAT50"), Some(DietGroup::Meat50));
        assert_eq!(DietGroup::parse("pescatarian"), None);
        assert_eq!(DietGroup::parse(""), None);
    }

    #[test]
    fn test_diet_group_from_label_is_exact() {
        assert_eq!(DietGroup::from_label("meat50"), Some(DietGroup::Meat50));
        assert_eq!(DietGroup::from_label("Vegan"), None);
        assert_eq!(DietGroup::from_label(" vegan"), None);
    }

    #[test]
    fn test_diet_group_ordering() {
        assert!(DietGroup::Fish < DietGroup::Meat);
        assert!(DietGroup::Meat100 < DietGroup::Meat50);
        assert!(DietGroup::Meat50 < DietGroup::Vegan);
        let labels: Vec<&str> = DietGroup::ALL.iter().map(DietGroup::as_str).collect();
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(labels, sorted);
        assert_eq!(DietGroup::Veggie.to_string(), "veggie");
    }

    #[test]
    fn test_indicator_index_matches_order() {
        for (i, indicator) in Indicator::ALL.iter().enumerate() {
            assert_eq!(indicator.index(), i);
        }
        assert_eq!(Indicator::WatScar.column(), "mean_watscar");
    }

    #[test]
    fn test_raw_record_value() {
        let mut record = RawRecord {
            diet_group: Some("fish".to_string()),
            sex: Some("female".to_string()),
            values: [Some(1.0); INDICATOR_COUNT],
        };
        assert_eq!(record.value(Indicator::Eut), Some(1.0));

        record.values[Indicator::Eut.index()] = None;
        assert_eq!(record.value(Indicator::Eut), None);
    }

    #[test]
    fn test_pivot_lookup() {
        let pivot = PivotMatrix {
            diet_groups: vec![DietGroup::Meat, DietGroup::Vegan],
            values: vec![vec![0.7, 0.1]; INDICATOR_COUNT],
        };
        assert_eq!(pivot.value(Indicator::Acid, DietGroup::Vegan), Some(0.1));
        assert_eq!(pivot.value(Indicator::Acid, DietGroup::Fish), None);
        assert_eq!(pivot.diet_group_labels(), vec!["meat", "vegan"]);
    }

    #[test]
    fn test_column_range_degenerate() {
        let range = ColumnRange {
            indicator: Indicator::Bio,
            min: 2.0,
            max: 2.0,
        };
        assert!(range.is_degenerate());
    }
}
