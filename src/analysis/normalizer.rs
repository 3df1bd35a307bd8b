//! Column-wise min-max normalization of the grouped table.

use crate::models::{ColumnRange, GroupedAggregate, Indicator};
use tracing::{debug, warn};

/// Observed min and max of one indicator column, or `None` for an empty table.
pub fn column_range(aggregate: &GroupedAggregate, indicator: Indicator) -> Option<ColumnRange> {
    let mut values = aggregate.column(indicator);
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    Some(ColumnRange {
        indicator,
        min,
        max,
    })
}

/// Map `value` from `[min, max]` onto `[0, 1]`. Requires `min < max`.
///
/// When the span overflows (`max - min` beyond `f64::MAX`) both operands are
/// halved first.
fn scale(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span.is_finite() {
        (value - min) / span
    } else {
        (value / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
    }
}

/// Rescale every indicator column to [0, 1] in place.
///
/// Each column is scaled independently across all rows. A column whose values
/// are all equal has no spread to scale by; every value in it becomes `0.0`.
/// Returns the ranges that were used, one per indicator, or an empty list when
/// the table has no rows.
pub fn normalize(aggregate: &mut GroupedAggregate) -> Vec<ColumnRange> {
    let mut ranges = Vec::with_capacity(Indicator::ALL.len());

    for indicator in Indicator::ALL {
        let Some(range) = column_range(aggregate, indicator) else {
            debug!("Nothing to normalize: grouped table is empty");
            return ranges;
        };

        let idx = indicator.index();
        if range.is_degenerate() {
            warn!(
                "Column {} has a single value ({}); normalizing to 0.0",
                indicator, range.min
            );
            for row in &mut aggregate.rows {
                row.values[idx] = 0.0;
            }
        } else {
            for row in &mut aggregate.rows {
                row.values[idx] = scale(row.values[idx], range.min, range.max);
            }
        }

        debug!(
            "Normalized {}: min={}, max={}",
            indicator, range.min, range.max
        );
        ranges.push(range);
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{aggregate, build_pivot};
    use crate::data::loader::sample_records;
    use crate::models::{DietGroup, GroupedRow, RawRecord};

    const EPS: f64 = 1e-12;

    fn normalized_sample() -> (GroupedAggregate, Vec<ColumnRange>) {
        let (mut aggregate, _) = aggregate(&sample_records());
        let ranges = normalize(&mut aggregate);
        (aggregate, ranges)
    }

    fn row(diet_group: DietGroup, sex: &str, values: [f64; 5]) -> GroupedRow {
        GroupedRow {
            diet_group,
            sex: sex.to_string(),
            count: 1,
            values,
        }
    }

    #[test]
    fn test_columns_span_zero_to_one() {
        let (aggregate, _) = normalized_sample();

        for indicator in Indicator::ALL {
            let range = column_range(&aggregate, indicator).unwrap();
            assert!((range.min - 0.0).abs() < EPS, "{indicator} min");
            assert!((range.max - 1.0).abs() < EPS, "{indicator} max");
        }
    }

    #[test]
    fn test_reported_ranges() {
        let (_, ranges) = normalized_sample();

        assert_eq!(ranges.len(), 5);
        assert_eq!(ranges[0].indicator, Indicator::GhgsCh4);
        assert_eq!((ranges[0].min, ranges[0].max), (1.0, 16.0));
        assert_eq!((ranges[4].min, ranges[4].max), (5.0, 24.0));
    }

    #[test]
    fn test_scaled_values() {
        let (aggregate, _) = normalized_sample();

        // meat/male ch4 mean is 13 on a 1..16 column
        let meat_male = aggregate
            .rows_for(DietGroup::Meat)
            .find(|r| r.sex == "male")
            .unwrap();
        assert!((meat_male.value(Indicator::GhgsCh4) - 0.8).abs() < EPS);
    }

    #[test]
    fn test_degenerate_column_maps_to_zero() {
        let mut aggregate = GroupedAggregate::new(vec![
            row(DietGroup::Fish, "female", [1.0, 2.0, 3.0, 4.0, 7.0]),
            row(DietGroup::Meat, "male", [3.0, 6.0, 9.0, 12.0, 7.0]),
        ]);

        let ranges = normalize(&mut aggregate);

        assert!(ranges[4].is_degenerate());
        assert!(aggregate.column(Indicator::Bio).all(|v| v == 0.0));
        assert!(aggregate.column(Indicator::Bio).all(f64::is_finite));
        assert_eq!(aggregate.rows[1].value(Indicator::Acid), 1.0);
    }

    #[test]
    fn test_single_row_is_degenerate_everywhere() {
        let mut aggregate =
            GroupedAggregate::new(vec![row(DietGroup::Vegan, "male", [1.0, 2.0, 3.0, 4.0, 5.0])]);

        normalize(&mut aggregate);

        assert_eq!(aggregate.rows[0].values, [0.0; 5]);
    }

    #[test]
    fn test_overflowing_span_stays_finite() {
        let mut aggregate = GroupedAggregate::new(vec![
            row(DietGroup::Fish, "female", [-f64::MAX, 1.0, 1.0, 1.0, 1.0]),
            row(DietGroup::Meat, "male", [0.0, 2.0, 2.0, 2.0, 2.0]),
            row(DietGroup::Vegan, "male", [f64::MAX, 1e308, 3.0, 3.0, 3.0]),
        ]);

        normalize(&mut aggregate);

        let ch4: Vec<f64> = aggregate.column(Indicator::GhgsCh4).collect();
        assert_eq!(ch4, vec![0.0, 0.5, 1.0]);
        let acid: Vec<f64> = aggregate.column(Indicator::Acid).collect();
        assert_eq!(acid[0], 0.0);
        assert_eq!(acid[2], 1.0);
        assert!(aggregate
            .rows
            .iter()
            .all(|r| r.values.iter().all(|v| v.is_finite())));
    }

    #[test]
    fn test_huge_inputs_reach_pivot_finite() {
        let raw = |diet: &str, sex: &str, ch4: f64| RawRecord {
            diet_group: Some(diet.to_string()),
            sex: Some(sex.to_string()),
            values: [Some(ch4), Some(1.0), Some(1.0), Some(1.0), Some(1.0)],
        };
        let records = vec![
            raw("vegan", "female", 1e308),
            raw("vegan", "female", 1e308),
            raw("meat", "male", 1.0),
        ];

        let (mut aggregate, _) = aggregate(&records);
        normalize(&mut aggregate);
        let pivot = build_pivot(&aggregate);

        assert_eq!(pivot.values[Indicator::GhgsCh4.index()], vec![0.0, 1.0]);
        assert!(pivot.values.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_empty_table() {
        let mut aggregate = GroupedAggregate::default();
        assert!(normalize(&mut aggregate).is_empty());
    }
}
