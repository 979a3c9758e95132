//! Domain models for inventory management.
//!
//! This module contains the core domain types: products, the inventory
//! collection that owns them, and configuration.

/// Product domain model and validation.
pub mod product;
pub use product::{InvalidProduct, Product, ProductName, ProductUpdate};

/// The in-memory product collection.
pub mod inventory;
pub use inventory::{Error, Inventory};

mod config;
pub use config::Config;
