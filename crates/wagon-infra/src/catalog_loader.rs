//! Vehicle catalog loader from TOML

use serde::Deserialize;
use std::fs;
use std::path::Path;

use wagon_domain::model::Vehicle;
use wagon_types::{ConfigError, Error, Result};

/// Container for parsing a catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    vehicles: Vec<Vehicle>,
}

/// Ordered vehicle catalog
#[derive(Debug, Clone)]
pub struct VehicleCatalog {
    vehicles: Vec<Vehicle>,
}

impl VehicleCatalog {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    /// Load a catalog from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        let catalog = Self::load_from_str(&content)?;
        log::debug!(
            "loaded {} vehicles from {}",
            catalog.count(),
            path.display()
        );
        Ok(catalog)
    }

    /// Load a catalog from a TOML string, keeping file order
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse vehicle catalog TOML: {}",
                e
            )))
        })?;

        let mut seen = std::collections::HashSet::new();
        for v in &file.vehicles {
            if !seen.insert(v.id.to_lowercase()) {
                return Err(Error::Config(ConfigError::ParseError(format!(
                    "Duplicate vehicle id in catalog: {}",
                    v.id
                ))));
            }
        }

        Ok(Self::new(file.vehicles))
    }

    /// Look up a vehicle by id, ignoring case and surrounding whitespace
    pub fn get(&self, id: &str) -> Option<&Vehicle> {
        let wanted = id.trim().to_lowercase();
        self.vehicles
            .iter()
            .find(|v| v.id.to_lowercase() == wanted)
    }

    /// Look up a vehicle or fail with `UnknownVehicle`
    pub fn require(&self, id: &str) -> Result<&Vehicle> {
        self.get(id)
            .ok_or_else(|| Error::UnknownVehicle(id.to_string()))
    }

    pub fn first(&self) -> Option<&Vehicle> {
        self.vehicles.first()
    }

    pub fn all(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn count(&self) -> usize {
        self.vehicles.len()
    }
}
