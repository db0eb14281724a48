//! Built-in reference data

pub mod catalog;

pub use catalog::{default_catalog, get_vehicle};
