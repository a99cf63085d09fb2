pub mod catalog_snapshot;

pub use catalog_snapshot::{CatalogError, CatalogSnapshot, ProductSelection};
