//! A filesystem backed inventory
//!
//! The [`Store`] binds an inventory root directory, its configuration and its
//! CSV data file to the filesystem agnostic [`Inventory`].
//!
//! The inventory never persists itself. Callers mutate it through
//! [`Store::inventory_mut`] and then call [`Store::save`].

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    domain::{Config, Error, Inventory},
    storage::csv_file::{self, LoadError, SaveError},
};

/// Name of the configuration file within the inventory root.
pub const CONFIG_FILE: &str = "config.toml";

/// An inventory loaded from a directory on disk.
#[derive(Debug)]
pub struct Store {
    /// The root of the directory the inventory is stored in.
    root: PathBuf,
    config: Config,
    inventory: Inventory,
}

impl Store {
    /// Opens the inventory stored at `root`.
    ///
    /// If the configuration file is missing or invalid, the default
    /// configuration is used. If the data file is missing, the inventory
    /// starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be loaded, or if it holds two
    /// products whose names differ only by case.
    pub fn open(root: PathBuf) -> Result<Self, OpenError> {
        let config = load_config(&root);
        let data_path = root.join(config.data_file());

        let products = csv_file::load(&data_path)?;
        let inventory = match Inventory::from_products(products, config.low_stock_threshold) {
            Ok(inventory) => inventory,
            Err(source) => {
                return Err(OpenError::Inventory {
                    path: data_path,
                    source,
                });
            }
        };

        Ok(Self {
            root,
            config,
            inventory,
        })
    }

    /// Creates a new inventory at `root` with the default configuration.
    ///
    /// The directory is created if needed. An existing data file is kept and
    /// loaded; otherwise an empty one is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the root already contains a configuration file, or
    /// if any file cannot be written.
    pub fn init(root: PathBuf) -> Result<Self, InitError> {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            return Err(InitError::AlreadyInitialised(root));
        }

        fs::create_dir_all(&root).map_err(|source| InitError::Io {
            path: root.clone(),
            source,
        })?;

        let config = Config::default();
        config.save(&config_path).map_err(InitError::Config)?;

        let data_path = root.join(config.data_file());
        if !data_path.exists() {
            csv_file::save(&data_path, &[])?;
        }

        Ok(Self::open(root)?)
    }

    /// The root directory of the inventory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The configuration the inventory was opened with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The path of the configuration file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// The path of the CSV data file.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.root.join(self.config.data_file())
    }

    /// The loaded inventory.
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Mutable access to the loaded inventory.
    ///
    /// Changes are not written to disk until [`Store::save`] is called.
    pub const fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Writes the inventory to the data file, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be written.
    pub fn save(&self) -> Result<(), SaveError> {
        let path = self.data_path();
        csv_file::save(&path, self.inventory.products())?;
        tracing::info!(
            "Saved {} products to {}",
            self.inventory.len(),
            path.display()
        );
        Ok(())
    }
}

fn load_config(root: &Path) -> Config {
    let path = root.join(CONFIG_FILE);
    Config::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

/// Errors that can occur when opening a [`Store`].
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    /// The data file could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The data file violates the inventory's invariants.
    #[error("inconsistent data file {}", .path.display())]
    Inventory {
        /// The data file.
        path: PathBuf,
        /// The violated invariant.
        #[source]
        source: Error,
    },
}

/// Errors that can occur when initialising a [`Store`].
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The directory already holds an inventory.
    #[error("inventory already initialised in {} (found existing config.toml)", .0.display())]
    AlreadyInitialised(PathBuf),

    /// The root directory could not be created.
    #[error("failed to create {}", .path.display())]
    Io {
        /// The directory being created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be written.
    #[error("{0}")]
    Config(String),

    /// The empty data file could not be written.
    #[error(transparent)]
    Save(#[from] SaveError),

    /// The new inventory could not be opened.
    #[error(transparent)]
    Open(#[from] OpenError),
}
