//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.dietdash.toml` files.

use crate::charts::ChartTheme;
use crate::dashboard::DashboardOptions;
use crate::models::DietGroup;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".dietdash.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input data settings.
    #[serde(default)]
    pub data: DataConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Chart and page settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Input data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the results table.
    #[serde(default = "default_data_path")]
    pub path: String,

    /// Field delimiter (a single ASCII character).
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            delimiter: default_delimiter(),
        }
    }
}

fn default_data_path() -> String {
    "Results_21Mar2022.csv".to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}

impl DataConfig {
    /// The delimiter as the byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(anyhow!(
                "Delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

impl ServerConfig {
    /// Socket address to bind. Host names such as `localhost` are resolved
    /// and the first address returned is used.
    pub async fn socket_addr(&self) -> Result<SocketAddr> {
        if let Ok(ip) = self.host.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, self.port));
        }

        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("Failed to resolve host: {}", self.host))?
            .next()
            .ok_or_else(|| anyhow!("Host {} resolved to no addresses", self.host))
    }
}

/// Chart and page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Diet group shown on the radar chart before any click.
    #[serde(default = "default_diet_group")]
    pub default_diet_group: String,

    /// Plotly color scale for the heatmap.
    #[serde(default = "default_colorscale")]
    pub colorscale: String,

    /// Page heading.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_diet_group: default_diet_group(),
            colorscale: default_colorscale(),
            title: default_title(),
        }
    }
}

fn default_diet_group() -> String {
    "meat".to_string()
}

fn default_colorscale() -> String {
    "YlOrRd".to_string()
}

fn default_title() -> String {
    "Diet and Environmental Impact Analysis".to_string()
}

impl DashboardConfig {
    /// Resolve into the options the dashboard state is built with.
    pub fn options(&self) -> Result<DashboardOptions> {
        let default_diet_group = DietGroup::parse(&self.default_diet_group).ok_or_else(|| {
            anyhow!(
                "Unknown default diet group: {} (expected one of fish, meat, meat50, meat100, vegan, veggie)",
                self.default_diet_group
            )
        })?;

        Ok(DashboardOptions {
            default_diet_group,
            theme: ChartTheme {
                colorscale: self.colorscale.clone(),
            },
        })
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data) = args.data {
            self.data.path = data.display().to_string();
        }
        if let Some(delimiter) = args.delimiter {
            self.data.delimiter = delimiter.to_string();
        }
        if let Some(ref host) = args.host {
            self.server.host = host.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if let Some(ref diet) = args.default_diet {
            self.dashboard.default_diet_group = diet.clone();
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
