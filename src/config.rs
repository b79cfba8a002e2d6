// Export configuration, loadable from a JSON file
use crate::spreadsheet::SpreadsheetLayout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub layout: SpreadsheetLayout,
    pub output_dir: PathBuf,
    pub include_links: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            layout: SpreadsheetLayout::default(),
            output_dir: PathBuf::from("."),
            include_links: true,
        }
    }
}

impl ExportConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ConfigError(e.to_string()))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
