#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;

pub use catalog::{Catalog, CatalogError};
