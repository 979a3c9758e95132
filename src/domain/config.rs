use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::inventory::DEFAULT_LOW_STOCK_THRESHOLD;

/// Configuration for an inventory.
///
/// This struct holds settings that control where products are stored and
/// when they are reported as low on stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// Quantity at or below which a product is reported as low on stock.
    pub low_stock_threshold: u32,

    /// Path of the CSV data file, relative to the inventory root.
    data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            data_file: default_data_file(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the data file path, relative to the inventory root.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Sets the data file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty, absolute or climbs out through
    /// `..`. The data file must live inside the inventory root.
    pub fn set_data_file(&mut self, path: PathBuf) -> Result<(), String> {
        if path.as_os_str().is_empty() {
            return Err("Data file path must not be empty".to_string());
        }
        if path.is_absolute() || path.has_root() {
            return Err(format!(
                "Data file path must be relative to the inventory root: {}",
                path.display()
            ));
        }
        if path.components().any(|c| c == Component::ParentDir) {
            return Err(format!(
                "Data file path must not leave the inventory root: {}",
                path.display()
            ));
        }
        self.data_file = path;
        Ok(())
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("inventory.csv")
}

const fn default_low_stock_threshold() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_low_stock_threshold")]
        low_stock_threshold: u32,

        #[serde(default = "default_data_file")]
        data_file: PathBuf,
    },
}

impl TryFrom<Versions> for Config {
    type Error = String;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 {
                low_stock_threshold,
                data_file,
            } => {
                let mut config = Self {
                    low_stock_threshold,
                    ..Self::default()
                };
                config.set_data_file(data_file)?;
                Ok(config)
            }
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            low_stock_threshold: config.low_stock_threshold,
            data_file: config.data_file,
        }
    }
}
