//! Radar chart comparing the sexes within one diet group.

use super::{ChartSpec, Layout, Line, Margin, Polar, RadialAxis, ScatterPolarTrace, Title, Trace};
use crate::models::{DietGroup, GroupedAggregate, GroupedRow, Indicator};

/// Build the radar chart for a diet group label.
///
/// One closed polygon per sex present in the group, on a radial axis fixed to
/// [0, 1]. A label that is not a valid diet group, or one with no rows, gives
/// a chart with no traces.
pub fn build_radar(diet_group: &str, aggregate: &GroupedAggregate) -> ChartSpec {
    let data = match DietGroup::parse(diet_group) {
        Some(group) => aggregate.rows_for(group).map(polygon).collect(),
        None => Vec::new(),
    };

    ChartSpec {
        data,
        layout: Layout {
            title: Some(Title::centered(format!("Radar Chart: {}", diet_group))),
            polar: Some(Polar {
                radialaxis: RadialAxis {
                    visible: true,
                    range: [0.0, 1.0],
                },
            }),
            showlegend: Some(true),
            margin: Some(Margin { t: 60, b: 30 }),
            ..Layout::default()
        },
    }
}

/// Trace for one grouped row. The first vertex is repeated to close the shape.
fn polygon(row: &GroupedRow) -> Trace {
    let mut r: Vec<f64> = Indicator::ALL.iter().map(|i| row.value(*i)).collect();
    let mut theta: Vec<String> = Indicator::ALL
        .iter()
        .map(|i| i.column().to_string())
        .collect();
    r.push(r[0]);
    theta.push(theta[0].clone());

    Trace::Scatterpolar(ScatterPolarTrace {
        name: row.sex.clone(),
        r,
        theta,
        fill: "toself".to_string(),
        line: Line {
            shape: "spline".to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{aggregate, normalize};
    use crate::data::loader::sample_records;

    fn normalized() -> GroupedAggregate {
        let (mut aggregate, _) = aggregate(&sample_records());
        normalize(&mut aggregate);
        aggregate
    }

    fn polar_traces(spec: &ChartSpec) -> Vec<&ScatterPolarTrace> {
        spec.data
            .iter()
            .map(|t| match t {
                Trace::Scatterpolar(trace) => trace,
                other => panic!("expected scatterpolar trace, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_vegan_has_trace_per_sex() {
        let spec = build_radar("vegan", &normalized());

        assert_eq!(spec.title(), Some("Radar Chart: vegan"));
        let names: Vec<&str> = polar_traces(&spec).into_iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["female", "male"]);
    }

    #[test]
    fn test_single_sex_group() {
        let spec = build_radar("meat100", &normalized());
        assert_eq!(spec.data.len(), 1);
    }

    #[test]
    fn test_polygon_is_closed() {
        let spec = build_radar("meat", &normalized());

        for trace in polar_traces(&spec) {
            assert_eq!(trace.r.len(), Indicator::ALL.len() + 1);
            assert_eq!(trace.r.first(), trace.r.last());
            assert_eq!(trace.theta.first(), trace.theta.last());
            assert_eq!(trace.theta[1], "mean_acid");
            assert_eq!(trace.fill, "toself");
            assert_eq!(trace.line.shape, "spline");
        }
    }

    #[test]
    fn test_values_within_unit_range() {
        let spec = build_radar("fish", &normalized());

        for trace in polar_traces(&spec) {
            assert!(trace.r.iter().all(|v| (0.0..=1.0).contains(v)));
        }
        let radial = &spec.layout.polar.as_ref().unwrap().radialaxis;
        assert!(radial.visible);
        assert_eq!(radial.range, [0.0, 1.0]);
    }

    #[test]
    fn test_legend_shown() {
        let spec = build_radar("meat", &normalized());
        assert_eq!(spec.layout.showlegend, Some(true));
    }

    #[test]
    fn test_unknown_group_has_no_traces() {
        let spec = build_radar("pescatarian", &normalized());
        assert!(spec.data.is_empty());
        assert_eq!(spec.title(), Some("Radar Chart: pescatarian"));
    }

    #[test]
    fn test_absent_group_has_no_traces() {
        let spec = build_radar("vegan", &GroupedAggregate::default());
        assert!(spec.data.is_empty());
    }
}
