pub mod csv_file;
pub mod store;

pub use store::{InitError, OpenError, Store};
