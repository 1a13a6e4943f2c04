//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any request
//! is made. A `.env` file in the working directory is honoured (loaded via
//! `dotenvy` in `main.rs`).
//!
//! ## Optional Variables
//!
//! - `QRCG_API_URL` - Listing endpoint (default: `https://api.qr-code-generator.com/v1/codes`)
//! - `QRCG_ACCESS_TOKEN` - API access token (prompted for when absent)
//! - `QRCG_PAGE_SIZE` - Records per full page (default: 20)
//! - `QRCG_MAX_PAGES` - Page limit per run (default: 50000)
//! - `QRCG_EXPORT_DIR` - Directory for CSV exports (default: `QRCG STATISTICS EXPORTS`)
//! - `QRCG_EXPORT_INCLUDE_ID` - Prefix exports with an `ID` column (default: true)
//! - `HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `RUST_LOG` - Log level (default: `warn`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use crate::application::services::inventory_service::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};
use crate::infrastructure::export::{DEFAULT_EXPORT_DIR, ExportSchema};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default listing endpoint of the QR Code Generator API.
pub const DEFAULT_API_URL: &str = "https://api.qr-code-generator.com/v1/codes";

/// Tool configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub access_token: Option<String>,
    pub page_size: usize,
    pub max_pages: u32,
    pub export_dir: PathBuf,
    pub export_include_id: bool,
    pub http_timeout_secs: u64,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            access_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            export_include_id: true,
            http_timeout_secs: 30,
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset or unparseable numeric variables fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = env::var("QRCG_API_URL").unwrap_or(defaults.api_url);
        let access_token = env::var("QRCG_ACCESS_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let page_size = env::var("QRCG_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.page_size);

        let max_pages = env::var("QRCG_MAX_PAGES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_pages);

        let export_dir = env::var("QRCG_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.export_dir);

        let export_include_id = env::var("QRCG_EXPORT_INCLUDE_ID")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(defaults.export_include_id);

        let http_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.http_timeout_secs);

        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        Self {
            api_url,
            access_token,
            page_size,
            max_pages,
            export_dir,
            export_include_id,
            http_timeout_secs,
            log_level,
            log_format,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `api_url` is not an absolute `http`/`https` URL
    /// - `page_size` is outside `1..=1000`
    /// - `max_pages` or `http_timeout_secs` is zero
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_url)
            .with_context(|| format!("QRCG_API_URL is not a valid URL: '{}'", self.api_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!(
                "QRCG_API_URL must use http or https, got '{}'",
                url.scheme()
            );
        }

        if !(1..=1000).contains(&self.page_size) {
            anyhow::bail!(
                "QRCG_PAGE_SIZE must be between 1 and 1000, got {}",
                self.page_size
            );
        }

        if self.max_pages == 0 {
            anyhow::bail!("QRCG_MAX_PAGES must be at least 1");
        }

        if self.http_timeout_secs == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECS must be greater than 0");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn export_schema(&self) -> ExportSchema {
        ExportSchema::from_include_id(self.export_include_id)
    }

    /// Logs a configuration summary (without the access token).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  API URL: {}", self.api_url);
        match &self.access_token {
            Some(token) => tracing::info!("  Access token: {}", mask_token(token)),
            None => tracing::info!("  Access token: not set (will prompt)"),
        }
        tracing::info!("  Page size: {}", self.page_size);
        tracing::info!("  Max pages: {}", self.max_pages);
        tracing::info!("  Export dir: {}", self.export_dir.display());
        tracing::info!("  Export schema: {:?}", self.export_schema());
        tracing::info!("  HTTP timeout: {}s", self.http_timeout_secs);
    }
}

/// Masks an access token for logging, keeping the last four characters.
///
/// - `abcdef123456` → `********3456`
/// - `abc` → `***`
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}
