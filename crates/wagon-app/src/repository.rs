//! Repository adapters for the infrastructure layer

use std::path::Path;

use wagon_infra::catalog_loader::VehicleCatalog;
use wagon_infra::persistence::InMemorySessionLogRepository;
use wagon_types::Result;

use crate::config::Config;
use crate::constants::default_catalog;

/// Open the vehicle catalog named in the config, or the built-in one
pub fn open_catalog(config: &Config) -> Result<VehicleCatalog> {
    match config.catalog_path {
        Some(ref path) => open_catalog_at(path),
        None => Ok(default_catalog()),
    }
}

/// Open a vehicle catalog from a TOML file
pub fn open_catalog_at(path: &Path) -> Result<VehicleCatalog> {
    VehicleCatalog::load_from_file(path)
}

/// Open a fresh session log
pub fn open_session_log() -> InMemorySessionLogRepository {
    InMemorySessionLogRepository::new()
}
