//! Heatmap → radar interaction.
//!
//! The dashboard is a two-node dependency graph. The heatmap has no inputs and
//! always renders the same figure. The radar depends only on the current
//! selection and is re-rendered whenever a heatmap click changes it.

use super::state::DashboardState;
use crate::charts::ChartSpec;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Click payload as emitted by the charting library (`clickData`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    #[serde(default)]
    pub points: Vec<ClickPoint>,
}

/// A clicked cell. On the heatmap, `x` is the diet group column label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClickPoint {
    #[serde(default)]
    pub x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}

impl ClickEvent {
    /// The clicked column label, if the event carries one.
    pub fn diet_group(&self) -> Option<&str> {
        self.points.first()?.x.as_deref()
    }
}

/// The currently selected diet group. `None` until the first click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(Option<String>);

impl Selection {
    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Drives the radar chart from heatmap clicks. Last click wins.
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: Arc<DashboardState>,
    selection: Selection,
}

impl InteractionController {
    pub fn new(state: Arc<DashboardState>) -> Self {
        Self {
            state,
            selection: Selection::default(),
        }
    }

    /// Heatmap node.
    pub fn heatmap(&self) -> ChartSpec {
        self.state.render_heatmap()
    }

    /// Radar node, evaluated against the current selection.
    pub fn current_radar(&self) -> ChartSpec {
        self.state.render_radar(self.selection.get())
    }

    /// Apply a heatmap click and re-render the radar.
    ///
    /// An event without a clicked label leaves the selection as it was.
    pub fn on_heatmap_click(&mut self, event: &ClickEvent) -> ChartSpec {
        match event.diet_group() {
            Some(label) => self.select(label),
            None => debug!("Click event without a diet group; keeping selection"),
        }
        self.current_radar()
    }

    /// Set the selection directly.
    pub fn select(&mut self, label: &str) {
        info!("Selected diet group: {}", label);
        self.selection = Selection(Some(label.to_string()));
    }

    /// Drop the selection (page reload).
    pub fn reset(&mut self) {
        self.selection = Selection::default();
    }

    /// Label the radar is currently rendered for.
    pub fn effective_diet_group(&self) -> &str {
        self.selection
            .get()
            .unwrap_or_else(|| self.state.default_diet_group().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::state::sample_state;

    fn controller() -> InteractionController {
        InteractionController::new(Arc::new(sample_state()))
    }

    fn click_on(label: &str) -> ClickEvent {
        ClickEvent {
            points: vec![ClickPoint {
                x: Some(label.to_string()),
                y: Some("mean_acid".to_string()),
            }],
        }
    }

    #[test]
    fn test_no_click_defaults_to_meat() {
        let controller = controller();

        assert_eq!(controller.effective_diet_group(), "meat");
        assert_eq!(controller.current_radar().title(), Some("Radar Chart: meat"));
    }

    #[test]
    fn test_click_vegan() {
        let mut controller = controller();
        let radar = controller.on_heatmap_click(&click_on("vegan"));

        assert_eq!(radar.title(), Some("Radar Chart: vegan"));
        assert_eq!(radar.data.len(), 2);
        assert_eq!(controller.effective_diet_group(), "vegan");
    }

    #[test]
    fn test_last_click_wins() {
        let mut controller = controller();
        controller.on_heatmap_click(&click_on("vegan"));
        controller.on_heatmap_click(&click_on("fish"));

        assert_eq!(controller.effective_diet_group(), "fish");
        assert_eq!(controller.current_radar().title(), Some("Radar Chart: fish"));
    }

    #[test]
    fn test_empty_click_keeps_selection() {
        let mut controller = controller();
        controller.select("veggie");
        let radar = controller.on_heatmap_click(&ClickEvent::default());

        assert_eq!(radar.title(), Some("Radar Chart: veggie"));
    }

    #[test]
    fn test_reset() {
        let mut controller = controller();
        controller.select("fish");
        controller.reset();

        assert_eq!(controller.effective_diet_group(), "meat");
    }

    #[test]
    fn test_heatmap_ignores_selection() {
        let mut controller = controller();
        let before = controller.heatmap();
        controller.select("vegan");

        assert_eq!(controller.heatmap(), before);
    }

    #[test]
    fn test_click_event_from_plotly_json() {
        let raw = r#"{"points":[{"curveNumber":0,"x":"meat50","y":"mean_acid","z":0.41}]}"#;
        let event: ClickEvent = serde_json::from_str(raw).unwrap();

        assert_eq!(event.diet_group(), Some("meat50"));
    }
}
