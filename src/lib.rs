//! Plain-text Inventory Management
//!
//! Products are rows of a CSV file stored in an inventory directory.

pub mod domain;
pub use domain::{Config, Error, InvalidProduct, Inventory, Product, ProductName, ProductUpdate};

/// Filesystem storage for inventories.
pub mod storage;
pub use storage::{Store, csv_file::LoadError, csv_file::SaveError};
