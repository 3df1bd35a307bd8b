//! DietDash - Diet and Environmental Impact Dashboard
//!
//! Loads a results table of dietary environmental-impact measurements,
//! aggregates it by diet group and sex, and serves a linked heatmap and
//! radar chart in the browser.
//!
//! Exit codes:
//!   0 - Clean shutdown, or a successful --dry-run / --init-config
//!   1 - Startup error (missing data file, bad config, bind failure, etc.)

mod analysis;
mod charts;
mod cli;
mod config;
mod dashboard;
mod data;
mod error;
mod models;
mod report;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE};
use dashboard::{AppState, DashboardState};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("DietDash v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Startup failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .dietdash.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to change the data file, server address, or chart defaults.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load the data, build the dashboard state, then either print a summary
/// (--dry-run) or serve until interrupted.
async fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let options = config.dashboard.options()?;
    let delimiter = config.data.delimiter_byte()?;
    let data_path = config.data.path.clone();

    // Step 1: Load the source table
    if !args.quiet {
        println!("📥 Loading data: {}", data_path);
    }
    let records = data::load_csv(Path::new(&data_path), delimiter)
        .with_context(|| format!("Failed to load dataset from {}", data_path))?;

    // Step 2: Aggregate, normalize and pivot
    let state = Arc::new(DashboardState::build(&records, options));
    let stats = state.stats();
    info!(
        "Prepared dashboard in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    if state.aggregate().is_empty() {
        warn!("No records survived filtering; charts will be empty");
    }

    // Handle --dry-run: print the summary and exit
    if args.dry_run {
        let report = state.summary(&data_path);
        let output = match args.format {
            OutputFormat::Json => report::generate_json_report(&report)?,
            OutputFormat::Text => report::generate_text_report(&report),
        };
        println!("{}", output);
        return Ok(());
    }

    if !args.quiet {
        println!(
            "📊 {} records kept of {} ({} incomplete, {} invalid diet group)",
            stats.kept, stats.total, stats.incomplete, stats.invalid_diet_group
        );
        println!(
            "   {} groups across {} diet groups",
            state.aggregate().len(),
            state.pivot().diet_groups.len()
        );
    }

    // Step 3: Serve
    let addr = config.server.socket_addr().await?;
    let app_state = AppState::new(state, &config.dashboard.title, &data_path);
    dashboard::server::serve(app_state, addr).await
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
