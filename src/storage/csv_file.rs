//! CSV serialization for products.
//!
//! An inventory file has a header row `Name,Price,Quantity,Category` followed
//! by one row per product, in inventory order.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::domain::{InvalidProduct, Product};

/// Column headers, in file order.
pub const HEADERS: [&str; 4] = ["Name", "Price", "Quantity", "Category"];

#[derive(Debug, Deserialize)]
struct Record {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Price")]
    price: f64,
    #[serde(rename = "Quantity")]
    quantity: u32,
    #[serde(rename = "Category")]
    category: String,
}

#[derive(Debug, Serialize)]
struct RecordRef<'a> {
    name: &'a str,
    price: f64,
    quantity: u32,
    category: &'a str,
}

impl<'a> From<&'a Product> for RecordRef<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            name: product.name().as_str(),
            price: product.price(),
            quantity: product.quantity(),
            category: product.category(),
        }
    }
}

/// Loads products from the CSV file at `path`.
///
/// A missing file is treated as an empty inventory.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, if a row cannot be
/// parsed, or if a row describes an invalid product.
pub fn load(path: &Path) -> Result<Vec<Product>, LoadError> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No data file at {}, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    read(file, path)
}

/// Reads products from CSV data. `path` is only used in error messages.
pub(crate) fn read<R: io::Read>(reader: R, path: &Path) -> Result<Vec<Product>, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut products = Vec::new();

    for (index, record) in reader.deserialize::<Record>().enumerate() {
        let record = record.map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let name = record.name.trim();
        let category = record.category.trim();
        let product = Product::new(name, record.price, record.quantity, category)
            .map_err(|source| LoadError::Invalid {
                path: path.to_path_buf(),
                record: index + 1,
                source,
            })?;
        products.push(product);
    }

    tracing::debug!("Loaded {} products from {}", products.len(), path.display());
    Ok(products)
}

/// Saves products to the CSV file at `path`, replacing its contents.
///
/// The parent directory is created if it does not exist.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written.
pub fn save(path: &Path, products: &[Product]) -> Result<(), SaveError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SaveError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = fs::File::create(path).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    write(file, products).map_err(|source| SaveError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the header row followed by one row per product.
pub(crate) fn write<W: io::Write>(writer: W, products: &[Product]) -> Result<(), csv::Error> {
    // Headers are written by hand so that an empty inventory still gets one.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(HEADERS)?;
    for product in products {
        writer.serialize(RecordRef::from(product))?;
    }
    writer.flush()?;
    Ok(())
}

/// Errors that can occur when loading products from CSV.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file exists but could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A row is malformed or a column is missing.
    #[error("failed to parse {}", .path.display())]
    Parse {
        /// The file being read.
        path: PathBuf,
        /// The underlying CSV error, including its position.
        #[source]
        source: csv::Error,
    },

    /// A row parsed correctly but describes an invalid product.
    #[error("invalid product in record {record} of {}", .path.display())]
    Invalid {
        /// The file being read.
        path: PathBuf,
        /// 1-based index of the data row, not counting the header.
        record: usize,
        /// What was wrong with the product.
        #[source]
        source: InvalidProduct,
    },
}

/// Errors that can occur when saving products to CSV.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// A directory or the file could not be created.
    #[error("failed to create {}", .path.display())]
    Io {
        /// The path being created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Rows could not be written.
    #[error("failed to write {}", .path.display())]
    Csv {
        /// The file being written.
        path: PathBuf,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },
}
