//! The interactive dashboard: precomputed state, the heatmap → radar
//! interaction, and the HTTP server that hosts both charts.

pub mod controller;
pub mod page;
pub mod server;
pub mod state;

pub use server::AppState;
pub use state::{DashboardOptions, DashboardState};
