//! HTTP hosting for the dashboard.
//!
//! Serves the page and the figure JSON. The tables are shared read-only; the
//! only mutable state is the radar selection behind the controller's mutex.

use super::controller::{ClickEvent, InteractionController};
use super::page::render_page;
use super::state::DashboardState;
use crate::charts::ChartSpec;
use crate::models::SummaryReport;
use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    dashboard: Arc<DashboardState>,
    controller: Arc<Mutex<InteractionController>>,
    page_title: Arc<str>,
    data_path: Arc<str>,
}

impl AppState {
    pub fn new(dashboard: Arc<DashboardState>, page_title: &str, data_path: &str) -> Self {
        let controller = InteractionController::new(Arc::clone(&dashboard));
        Self {
            dashboard,
            controller: Arc::new(Mutex::new(controller)),
            page_title: Arc::from(page_title),
            data_path: Arc::from(data_path),
        }
    }

    /// Lock the controller. Renders cannot leave it half-updated, so a
    /// poisoned lock is recovered rather than propagated.
    fn controller(&self) -> MutexGuard<'_, InteractionController> {
        self.controller
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Query string for `GET /api/radar`.
#[derive(Debug, Deserialize)]
pub struct RadarQuery {
    pub diet_group: Option<String>,
}

/// Response body for `GET /api/summary`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Diet group the radar chart currently shows.
    pub selection: String,
    #[serde(flatten)]
    pub report: SummaryReport,
}

/// Build the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/heatmap", get(heatmap))
        .route("/api/radar", get(radar))
        .route("/api/heatmap/click", post(heatmap_click))
        .route("/api/summary", get(summary))
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind dashboard server to {}", addr))?;

    info!("Dashboard listening on http://{}", addr);
    println!("🌐 Dashboard running at http://{}", addr);
    println!("   Press Ctrl-C to stop.");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Dashboard server error")?;

    info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Serving the page starts a fresh session: any previous selection is dropped.
async fn index(State(state): State<AppState>) -> Html<String> {
    state.controller().reset();
    Html(render_page(&state.page_title))
}

async fn health() -> &'static str {
    "ok"
}

async fn heatmap(State(state): State<AppState>) -> Json<ChartSpec> {
    Json(state.controller().heatmap())
}

async fn radar(State(state): State<AppState>, Query(query): Query<RadarQuery>) -> Json<ChartSpec> {
    let spec = match query.diet_group.as_deref() {
        Some(label) => state.dashboard.render_radar(Some(label)),
        None => state.controller().current_radar(),
    };
    Json(spec)
}

async fn heatmap_click(
    State(state): State<AppState>,
    Json(event): Json<ClickEvent>,
) -> Json<ChartSpec> {
    debug!("Heatmap click: {:?}", event);
    let spec = state.controller().on_heatmap_click(&event);
    debug!("Re-rendered {}", spec.title().unwrap_or("radar"));
    Json(spec)
}

async fn summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let selection = state.controller().effective_diet_group().to_string();
    Json(SummaryResponse {
        selection,
        report: state.dashboard.summary(&state.data_path),
    })
}
