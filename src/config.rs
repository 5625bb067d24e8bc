//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::query::params::{Paging, DEFAULT_MAX_PAGE_SIZE};
use crate::query::DEFAULT_PAGE_SIZE;
use crate::seo::Site;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog location: a JSON file path or an http(s) URL
    #[serde(default = "default_source")]
    pub source: String,

    /// Address the API server binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Port the API server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Page size when a request gives none
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Requested page sizes above this are clamped
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Maximum number of recommended products per request
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    /// Origin allowed by CORS (e.g. https://shop.example.com)
    #[serde(default)]
    pub cors_origin: Option<String>,

    /// Per-request timeout, also used for remote catalog fetches
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Store name used in page metadata
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Currency code used in page metadata
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Output format for CLI commands
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_source() -> String {
    "data/battery.json".to_string()
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> usize {
    DEFAULT_MAX_PAGE_SIZE
}

fn default_recommendation_limit() -> usize {
    4
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_site_name() -> String {
    "BatteryHub".to_string()
}

fn default_currency() -> String {
    "INR".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: default_source(),
            bind: default_bind(),
            port: default_port(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            recommendation_limit: default_recommendation_limit(),
            cors_origin: None,
            request_timeout_secs: default_request_timeout_secs(),
            site_name: default_site_name(),
            currency: default_currency(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("catalog.toml");
        if local_config.exists() {
            debug!("Found catalog.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("battery-catalog").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(source) = std::env::var("CATALOG_SOURCE") {
            if !source.is_empty() {
                self.source = source;
            }
        }

        if let Ok(bind) = std::env::var("CATALOG_BIND") {
            if !bind.is_empty() {
                self.bind = bind;
            }
        }

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse() {
                self.port = p;
            }
        }

        self
    }

    /// Paging limits for query coercion.
    pub fn paging(&self) -> Paging {
        Paging { default_page_size: self.default_page_size, max_page_size: self.max_page_size }
    }

    /// Storefront identity for page metadata.
    pub fn site(&self) -> Site {
        Site { name: self.site_name.clone(), currency: self.currency.clone() }
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
