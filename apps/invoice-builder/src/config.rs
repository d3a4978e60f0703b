//! # Configuration
//!
//! Settings the host reads at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`INVOICE_*`)
//! 2. Defaults (this file)
//!
//! Invalid environment values are logged and ignored; startup never fails
//! on configuration.

use std::path::PathBuf;

use directories::ProjectDirs;
use invoice_core::TaxRate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Overrides the store file location.
pub const STORE_PATH_ENV: &str = "INVOICE_STORE_PATH";

/// Overrides the tax rate of a fresh invoice, as a percentage ("8.25").
pub const TAX_RATE_ENV: &str = "INVOICE_TAX_RATE";

/// Store file name inside the data directory.
const STORE_FILE_NAME: &str = "invoice.json";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No home directory to derive a data directory from.
    #[error("Could not determine app data directory")]
    NoDataDir,

    /// Tax rate override is not a non-negative number.
    #[error("Invalid tax rate '{value}': expected a percentage such as 8.25")]
    InvalidTaxRate { value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderConfig {
    /// JSON file holding the saved invoice.
    pub store_path: PathBuf,

    /// Tax rate used when nothing has been saved yet.
    pub default_tax_rate: TaxRate,
}

impl Default for BuilderConfig {
    /// Store in the platform data directory, 8% tax.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.invoice.builder/invoice.json`
    /// - **Windows**: `%APPDATA%\invoice\builder\data\invoice.json`
    /// - **Linux**: `~/.local/share/builder/invoice.json`
    fn default() -> Self {
        let store_path = default_store_path().unwrap_or_else(|err| {
            warn!(error = %err, "Falling back to a store in the working directory");
            PathBuf::from(STORE_FILE_NAME)
        });

        BuilderConfig {
            store_path,
            default_tax_rate: TaxRate::default(),
        }
    }
}

impl BuilderConfig {
    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `INVOICE_STORE_PATH`: Override the store file
    /// - `INVOICE_TAX_RATE`: Override the default tax rate (e.g., "8.25")
    pub fn from_env() -> Self {
        BuilderConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = BuilderConfig::default();

        if let Some(path) = lookup(STORE_PATH_ENV) {
            config.store_path = PathBuf::from(path);
        }

        if let Some(value) = lookup(TAX_RATE_ENV) {
            match parse_tax_rate_percentage(&value) {
                Ok(rate) => config.default_tax_rate = rate,
                Err(err) => warn!(error = %err, "Ignoring {}", TAX_RATE_ENV),
            }
        }

        config
    }
}

/// Platform data directory + `invoice.json`.
pub fn default_store_path() -> ConfigResult<PathBuf> {
    let dirs = ProjectDirs::from("com", "invoice", "builder").ok_or(ConfigError::NoDataDir)?;
    Ok(dirs.data_dir().join(STORE_FILE_NAME))
}

/// Parses a percentage such as "8.25" into a tax rate (clamped to 100%).
pub fn parse_tax_rate_percentage(value: &str) -> ConfigResult<TaxRate> {
    let invalid = || ConfigError::InvalidTaxRate {
        value: value.to_string(),
    };

    let pct = value.trim().parse::<f64>().map_err(|_| invalid())?;
    if !pct.is_finite() || pct < 0.0 {
        return Err(invalid());
    }

    Ok(TaxRate::from_percentage(pct))
}
