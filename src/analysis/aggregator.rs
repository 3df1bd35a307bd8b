//! Filtering and grouping of raw records.
//!
//! Rows with any missing field are dropped, then rows outside the six valid
//! diet groups, and the rest are averaged per (diet group, sex).

use crate::models::{
    DietGroup, FilterStats, GroupedAggregate, GroupedRow, Indicator, RawRecord, INDICATOR_COUNT,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Running means for one group.
///
/// Updated incrementally so that values near `f64::MAX` never overflow an
/// intermediate sum.
#[derive(Default)]
struct Accumulator {
    means: [f64; INDICATOR_COUNT],
    count: usize,
}

impl Accumulator {
    fn add(&mut self, values: &[f64; INDICATOR_COUNT]) {
        self.count += 1;
        let n = self.count as f64;
        for (mean, value) in self.means.iter_mut().zip(values) {
            *mean += value / n - *mean / n;
        }
    }
}

/// A record that passed both filters.
struct ValidRecord<'a> {
    diet_group: DietGroup,
    sex: &'a str,
    values: [f64; INDICATOR_COUNT],
}

/// Why a record was dropped.
enum Rejection {
    Incomplete,
    InvalidDietGroup,
}

/// Check a record against both filters, nulls first.
fn validate(record: &RawRecord) -> Result<ValidRecord<'_>, Rejection> {
    let (Some(label), Some(sex)) = (record.diet_group.as_deref(), record.sex.as_deref()) else {
        return Err(Rejection::Incomplete);
    };

    let mut values = [0.0; INDICATOR_COUNT];
    for (slot, indicator) in values.iter_mut().zip(Indicator::ALL) {
        *slot = record.value(indicator).ok_or(Rejection::Incomplete)?;
    }

    let diet_group = DietGroup::from_label(label).ok_or(Rejection::InvalidDietGroup)?;

    Ok(ValidRecord {
        diet_group,
        sex,
        values,
    })
}

/// Filter the raw records and compute per-(diet group, sex) indicator means.
pub fn aggregate(records: &[RawRecord]) -> (GroupedAggregate, FilterStats) {
    let mut stats = FilterStats {
        total: records.len(),
        ..FilterStats::default()
    };
    let mut groups: BTreeMap<(DietGroup, &str), Accumulator> = BTreeMap::new();

    for record in records {
        match validate(record) {
            Ok(valid) => {
                stats.kept += 1;
                groups
                    .entry((valid.diet_group, valid.sex))
                    .or_default()
                    .add(&valid.values);
            }
            Err(Rejection::Incomplete) => stats.incomplete += 1,
            Err(Rejection::InvalidDietGroup) => stats.invalid_diet_group += 1,
        }
    }

    debug!(
        "Filtered {} records: {} incomplete, {} invalid diet group, {} kept",
        stats.total, stats.incomplete, stats.invalid_diet_group, stats.kept
    );

    let rows: Vec<GroupedRow> = groups
        .into_iter()
        .map(|((diet_group, sex), acc)| GroupedRow {
            diet_group,
            sex: sex.to_string(),
            count: acc.count,
            values: acc.means,
        })
        .collect();

    debug!("Grouped into {} (diet_group, sex) rows", rows.len());

    (GroupedAggregate::new(rows), stats)
}
