//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::DietGroup;
use clap::Parser;
use std::path::PathBuf;

/// DietDash - environmental impact of diet groups, in the browser
///
/// Loads a results table, averages the five impact indicators per diet group
/// and sex, and serves a linked heatmap and radar chart.
///
/// Examples:
///   dietdash
///   dietdash --data Results_21Mar2022.csv --port 8080
///   dietdash --default-diet vegan --host 0.0.0.0
///   dietdash --dry-run --format json
///   dietdash --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the results table
    ///
    /// Defaults to Results_21Mar2022.csv in the working directory, or the
    /// path set in .dietdash.toml.
    #[arg(short, long, value_name = "FILE", env = "DIETDASH_DATA")]
    pub data: Option<PathBuf>,

    /// Field delimiter of the results table
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Interface to bind the dashboard server to (IP address or host name)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to bind the dashboard server to
    #[arg(short, long, value_name = "PORT", env = "DIETDASH_PORT")]
    pub port: Option<u16>,

    /// Diet group shown on the radar chart before any selection
    ///
    /// One of: fish, meat, meat50, meat100, vegan, veggie.
    #[arg(long, value_name = "GROUP")]
    pub default_diet: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .dietdash.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: load and aggregate the data, print a summary and exit
    ///
    /// No server is started.
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for --dry-run (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Generate a default .dietdash.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the dry-run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown tables (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.port == Some(0) {
            return Err("Port must be between 1 and 65535".to_string());
        }

        if let Some(delimiter) = self.delimiter {
            if !delimiter.is_ascii() {
                return Err("Delimiter must be a single ASCII character".to_string());
            }
        }

        if let Some(ref diet) = self.default_diet {
            if DietGroup::parse(diet).is_none() {
                return Err(format!(
                    "Unknown diet group '{}'. Expected one of: fish, meat, meat50, meat100, vegan, veggie",
                    diet
                ));
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
