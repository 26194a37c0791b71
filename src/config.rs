//! TOML-backed configuration: dataset location, parsing options, and the
//! column sets each chart page loads.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::columns;
use crate::error::{DashboardError, Result};

/// Config file name inside the config directory
pub const CONFIG_FILE: &str = "salesboard.toml";

/// Manages the config directory and config file operations
#[derive(Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager with a custom config directory (primarily for testing)
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Create a new ConfigManager for the given app name
    pub fn new(app_name: &str) -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                DashboardError::Config("Could not determine config directory".to_string())
            })?
            .join(app_name);

        Ok(Self { config_dir })
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of the config file within the config directory
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Load the configuration, falling back to defaults when no file exists.
    /// A present-but-malformed file is an error, not a silent default.
    pub fn load(&self) -> Result<DashboardConfig> {
        let path = self.config_path();
        if !path.exists() {
            return Ok(DashboardConfig::default());
        }
        let contents = std::fs::read_to_string(&path)?;
        toml::from_str(&contents)
            .map_err(|e| DashboardError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Write the configuration to the config directory, creating it if needed.
    pub fn save(&self, config: &DashboardConfig) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)?;
        }
        let contents = toml::to_string_pretty(config)
            .map_err(|e| DashboardError::Config(e.to_string()))?;
        std::fs::write(self.config_path(), contents)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub dataset: DatasetConfig,
    pub columns: ColumnSets,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            columns: ColumnSets::default(),
        }
    }
}

/// Where the transactions table lives and how to parse it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
    pub delimiter: char,
    /// strftime format of the order/ship date columns
    pub date_format: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".local/data/Superstore.csv"),
            delimiter: ',',
            date_format: "%d-%m-%Y".to_string(),
        }
    }
}

impl DatasetConfig {
    /// Convenience constructor for a dataset at `path` with default parsing.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Column projection per chart page. Each page loads only the columns it
/// aggregates over; names refer to the enriched table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSets {
    pub profit_margin: Vec<String>,
    pub sales: Vec<String>,
    pub shipments: Vec<String>,
    pub geography: Vec<String>,
    pub overview: Vec<String>,
}

impl Default for ColumnSets {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self {
            profit_margin: owned(&[
                columns::YEAR,
                columns::CATEGORY,
                columns::SUB_CATEGORY,
                columns::PROFIT_MARGIN,
            ]),
            sales: owned(&[columns::ORDER_DATE, columns::CATEGORY, columns::SALES]),
            shipments: owned(&[
                columns::SHIP_YEAR,
                columns::CATEGORY,
                columns::SUB_CATEGORY,
                columns::SHIP_MODE,
            ]),
            geography: owned(&[
                columns::ORDER_DATE,
                columns::YEAR,
                columns::CATEGORY,
                columns::STATE,
                columns::SALES,
                columns::NET_PROFIT,
            ]),
            overview: owned(&[columns::YEAR, columns::SALES, columns::NET_PROFIT]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let config = DashboardConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: DashboardConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_dir(dir.path().join("nope"));
        let config = manager.load().unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_dir(dir.path().to_path_buf());
        let mut config = DashboardConfig::default();
        config.dataset.path = PathBuf::from("/data/sales.csv");
        config.dataset.delimiter = ';';
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_dir(dir.path().to_path_buf());
        std::fs::write(manager.config_path(), "dataset = 5").unwrap();
        let err = manager.load().unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }

    #[test]
    fn partial_file_fills_remaining_fields() {
        let parsed: DashboardConfig =
            toml::from_str("[dataset]\npath = \"/tmp/orders.csv\"\n").unwrap();
        assert_eq!(parsed.dataset.path, PathBuf::from("/tmp/orders.csv"));
        assert_eq!(parsed.dataset.date_format, "%d-%m-%Y");
        assert_eq!(parsed.columns, ColumnSets::default());
    }
}
