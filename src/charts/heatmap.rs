//! Heatmap of normalized indicator values per diet group.

use super::{Axis, ChartSpec, ChartTheme, ColorBar, HeatmapTrace, Layout, Margin, Title, Trace};
use crate::models::PivotMatrix;

pub const HEATMAP_TITLE: &str = "🌱 Environmental Impact Heatmap by Diet Group";

const HOVER_TEMPLATE: &str = "Diet: %{x}<br>Indicator: %{y}<br>Value: %{z:.2f}<extra></extra>";

/// Build the heatmap: diet groups across, indicators down, on a fixed [0, 1]
/// color scale. Clicking a cell selects its diet group (`points[0].x`).
pub fn build_heatmap(pivot: &PivotMatrix, theme: &ChartTheme) -> ChartSpec {
    let text = pivot
        .values
        .iter()
        .map(|row| row.iter().map(|v| format!("{:.2}", v)).collect())
        .collect();

    let trace = HeatmapTrace {
        x: pivot.diet_group_labels(),
        y: pivot.indicator_labels(),
        z: pivot.values.clone(),
        zmin: 0.0,
        zmax: 1.0,
        colorscale: theme.colorscale.clone(),
        text,
        texttemplate: "%{text}".to_string(),
        hovertemplate: HOVER_TEMPLATE.to_string(),
        colorbar: ColorBar {
            title: Title::new("Normalized Value"),
        },
    };

    ChartSpec {
        data: vec![Trace::Heatmap(trace)],
        layout: Layout {
            title: Some(Title::centered(HEATMAP_TITLE)),
            xaxis: Some(Axis {
                title: Title::new("Diet Group"),
            }),
            yaxis: Some(Axis {
                title: Title::new("Environmental Indicators"),
            }),
            clickmode: Some("event+select".to_string()),
            margin: Some(Margin { t: 80, b: 60 }),
            ..Layout::default()
        },
    }
}
