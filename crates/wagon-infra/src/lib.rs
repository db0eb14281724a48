//! Infrastructure layer - file loaders and repository implementations

pub mod catalog_loader;
pub mod persistence;
pub mod scenario_csv;
