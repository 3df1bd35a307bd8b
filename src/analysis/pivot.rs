//! Indicator × diet-group matrix for the heatmap.

use crate::models::{DietGroup, GroupedAggregate, Indicator, PivotMatrix, INDICATOR_COUNT};
use std::collections::BTreeMap;

/// Average the (normalized) grouped rows over sex and transpose, giving one
/// row per indicator and one column per diet group present.
pub fn build_pivot(aggregate: &GroupedAggregate) -> PivotMatrix {
    let mut sums: BTreeMap<DietGroup, ([f64; INDICATOR_COUNT], usize)> = BTreeMap::new();

    for row in &aggregate.rows {
        let (acc, n) = sums.entry(row.diet_group).or_insert(([0.0; INDICATOR_COUNT], 0));
        for (slot, value) in acc.iter_mut().zip(&row.values) {
            *slot += value;
        }
        *n += 1;
    }

    let diet_groups: Vec<DietGroup> = sums.keys().copied().collect();
    let values = Indicator::ALL
        .iter()
        .map(|indicator| {
            sums.values()
                .map(|(acc, n)| acc[indicator.index()] / *n as f64)
                .collect()
        })
        .collect();

    PivotMatrix {
        diet_groups,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{aggregate, normalize};
    use crate::data::loader::sample_records;

    const EPS: f64 = 1e-12;

    fn sample_tables() -> (GroupedAggregate, PivotMatrix) {
        let (mut aggregate, _) = aggregate(&sample_records());
        normalize(&mut aggregate);
        let pivot = build_pivot(&aggregate);
        (aggregate, pivot)
    }

    #[test]
    fn test_shape() {
        let (_, pivot) = sample_tables();

        assert_eq!(pivot.values.len(), INDICATOR_COUNT);
        assert!(pivot.values.iter().all(|row| row.len() == 6));
        assert_eq!(
            pivot.diet_group_labels(),
            vec!["fish", "meat", "meat100", "meat50", "vegan", "veggie"]
        );
    }

    #[test]
    fn test_cells_are_mean_over_sex() {
        let (aggregate, pivot) = sample_tables();

        for indicator in Indicator::ALL {
            for group in aggregate.diet_groups() {
                let rows: Vec<f64> = aggregate
                    .rows_for(group)
                    .map(|r| r.value(indicator))
                    .collect();
                let expected = rows.iter().sum::<f64>() / rows.len() as f64;
                let cell = pivot.value(indicator, group).unwrap();
                assert!((cell - expected).abs() < EPS, "{indicator}/{group}");
            }
        }
    }

    #[test]
    fn test_meat_methane_cell() {
        let (_, pivot) = sample_tables();

        // female 9/15 and male 12/15
        let cell = pivot.value(Indicator::GhgsCh4, DietGroup::Meat).unwrap();
        assert!((cell - 0.7).abs() < EPS);
    }

    #[test]
    fn test_empty_aggregate() {
        let pivot = build_pivot(&GroupedAggregate::default());
        assert!(pivot.diet_groups.is_empty());
        assert!(pivot.values.iter().all(Vec::is_empty));
    }
}
