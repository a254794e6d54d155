//! Configuration structures for the import pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ItinError;
use crate::import::rules::time::parse_clock_24h;

/// Main configuration for itin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItinConfig {
    /// Import defaults.
    pub import: ImportConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Record store configuration.
    pub store: StoreConfig,
}

/// Defaults applied while parsing confirmations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Currency assumed when a document states none.
    pub default_currency: String,

    /// Lodging check-in time when only a date is known ("HH:MM").
    pub check_in_time: String,

    /// Lodging check-out time when only a date is known ("HH:MM").
    pub check_out_time: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
            check_in_time: "15:00".to_string(),
            check_out_time: "11:00".to_string(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length to consider the extraction usable.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 20 }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file holding every collection.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("itin-store.json"),
        }
    }
}

impl ItinConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Reject settings the parser cannot use.
    pub fn validate(&self) -> crate::error::Result<()> {
        let import = &self.import;
        let currency_ok = import.default_currency.len() == 3
            && import.default_currency.chars().all(|c| c.is_ascii_uppercase());
        if !currency_ok {
            return Err(ItinError::Config(format!(
                "import.default_currency must be an ISO code like \"USD\", got {:?}",
                import.default_currency
            )));
        }

        for (key, value) in [
            ("import.check_in_time", &import.check_in_time),
            ("import.check_out_time", &import.check_out_time),
        ] {
            if parse_clock_24h(value).is_none() {
                return Err(ItinError::Config(format!(
                    "{} must be HH:MM, got {:?}",
                    key, value
                )));
            }
        }

        if self.store.path.as_os_str().is_empty() {
            return Err(ItinError::Config("store.path must not be empty".to_string()));
        }

        Ok(())
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
