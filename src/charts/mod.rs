//! Chart specifications.
//!
//! Charts are plain data: a list of traces plus a layout, serialized as
//! Plotly figure JSON and drawn in the browser. Optional fields that are
//! unset are left out of the JSON so Plotly falls back to its own defaults.

pub mod heatmap;
pub mod radar;

pub use heatmap::build_heatmap;
pub use radar::build_radar;

use serde::{Deserialize, Serialize};

/// A complete figure: traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl ChartSpec {
    /// Title text, if the layout has one.
    pub fn title(&self) -> Option<&str> {
        self.layout.title.as_ref().map(|t| t.text.as_str())
    }
}

/// One trace, tagged with its Plotly trace type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Heatmap(HeatmapTrace),
    Scatterpolar(ScatterPolarTrace),
}

/// Colored grid of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapTrace {
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub z: Vec<Vec<f64>>,
    pub zmin: f64,
    pub zmax: f64,
    pub colorscale: String,
    /// Per-cell labels.
    pub text: Vec<Vec<String>>,
    pub texttemplate: String,
    pub hovertemplate: String,
    pub colorbar: ColorBar,
}

/// Closed polygon on polar axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPolarTrace {
    pub name: String,
    pub r: Vec<f64>,
    pub theta: Vec<String>,
    pub fill: String,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub shape: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBar {
    pub title: Title,
}

/// Title text with optional horizontal placement (0.5 centers it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: None,
        }
    }

    pub fn centered(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: Some(0.5),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polar: Option<Polar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clickmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polar {
    pub radialaxis: RadialAxis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialAxis {
    pub visible: bool,
    pub range: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub t: u32,
    pub b: u32,
}

/// Presentation settings shared by the chart builders.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    /// Named Plotly color scale for the heatmap.
    pub colorscale: String,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            colorscale: "YlOrRd".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trace_type_tag() {
        let trace = Trace::Scatterpolar(ScatterPolarTrace {
            name: "female".to_string(),
            r: vec![0.5],
            theta: vec!["mean_acid".to_string()],
            fill: "toself".to_string(),
            line: Line {
                shape: "spline".to_string(),
            },
        });

        let value = serde_json::to_value(&trace).unwrap();
        assert_eq!(value["type"], "scatterpolar");
        assert_eq!(value["fill"], "toself");
        assert_eq!(value["line"]["shape"], "spline");
    }

    #[test]
    fn test_layout_omits_unset_fields() {
        let layout = Layout {
            title: Some(Title::centered("Chart")),
            ..Layout::default()
        };

        let value = serde_json::to_value(&layout).unwrap();
        assert_eq!(value, json!({ "title": { "text": "Chart", "x": 0.5 } }));
    }

    #[test]
    fn test_chart_spec_title() {
        let spec = ChartSpec {
            data: Vec::new(),
            layout: Layout {
                title: Some(Title::new("Radar Chart: meat")),
                ..Layout::default()
            },
        };
        assert_eq!(spec.title(), Some("Radar Chart: meat"));
    }
}
