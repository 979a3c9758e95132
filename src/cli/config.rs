use std::path::{Path, PathBuf};

use invman::{Config, storage::store::CONFIG_FILE};
use tracing::instrument;

use crate::cli::terminal::Colorize;

#[derive(Debug, clap::Parser)]
/// Show or modify inventory configuration
///
/// Configuration is stored in config.toml in the inventory root.
///
/// Available configuration keys:
///   `low_stock_threshold`  Quantity at or below which stock is low (default: 5)
///   `data_file`            CSV file holding the products (default:
/// inventory.csv)
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key to retrieve
        ///
        /// Available keys: `low_stock_threshold`, `data_file`
        key: String,
    },

    /// Set a configuration value
    ///
    /// Examples:
    ///   inv config set `low_stock_threshold` 10
    ///   inv config set `data_file` stock/products.csv
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config_path = root.join(CONFIG_FILE);

        match self.command {
            ConfigCommand::Show => Self::show_config(&config_path),
            ConfigCommand::Get { key } => Self::get_config(&config_path, &key),
            ConfigCommand::Set { key, value } => Self::set_config(&config_path, &key, &value),
        }
    }

    fn load(config_path: &Path) -> anyhow::Result<Config> {
        if config_path.exists() {
            Config::load(config_path).map_err(|e| anyhow::anyhow!("{e}"))
        } else {
            Ok(Config::default())
        }
    }

    fn show_config(config_path: &Path) -> anyhow::Result<()> {
        let config = Self::load(config_path)?;

        println!("Configuration:");
        println!("  low_stock_threshold: {}", config.low_stock_threshold);
        println!("  data_file: {}", config.data_file().display());
        if !config_path.exists() {
            println!("{}", "(defaults, no config.toml found)".dim());
        }
        Ok(())
    }

    fn get_config(config_path: &Path, key: &str) -> anyhow::Result<()> {
        let config = Self::load(config_path)?;

        match key {
            "low_stock_threshold" => println!("{}", config.low_stock_threshold),
            "data_file" => println!("{}", config.data_file().display()),
            _ => {
                anyhow::bail!(
                    "Unknown configuration key: '{key}'\n\nAvailable keys:\n  \
                     low_stock_threshold\n  data_file",
                );
            }
        }
        Ok(())
    }

    fn set_config(config_path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
        let mut config = Self::load(config_path)?;

        match key {
            "low_stock_threshold" => {
                let threshold = value
                    .parse::<u32>()
                    .map_err(|_| anyhow::anyhow!("Value must be a non-negative whole number"))?;
                config.low_stock_threshold = threshold;
                config.save(config_path).map_err(|e| anyhow::anyhow!("{e}"))?;

                println!(
                    "{}",
                    format!("Low-stock threshold: ≤ {threshold}").success()
                );
            }
            "data_file" => {
                config
                    .set_data_file(PathBuf::from(value))
                    .map_err(|e| anyhow::anyhow!("{e}"))?;
                config.save(config_path).map_err(|e| anyhow::anyhow!("{e}"))?;

                println!("{}", format!("Data file: {value}").success());
                println!(
                    "{}",
                    "Existing products are not moved to the new file.".dim()
                );
            }
            _ => {
                anyhow::bail!(
                    "Unknown configuration key: '{key}'\nSupported keys: low_stock_threshold, \
                     data_file",
                );
            }
        }
        Ok(())
    }
}
