//! Configuration management for wagon-calc
//!
//! Config stored at: ~/.config/wagon-calc/config.json

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use wagon_domain::model::{CapacityAllowance, FillOrder, LoadConstants};
use wagon_types::{ConfigError, OutputFormat, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Vehicle used when none is given (first catalog entry if unset)
    #[serde(default)]
    pub default_vehicle: Option<String>,

    /// Which load goes on the floor first in the diagram
    #[serde(default)]
    pub fill_order: FillOrder,

    /// Double-stack pallets by default
    #[serde(default)]
    pub double_stack: bool,

    /// Diagram width in pallets (derived from the vehicle width if unset)
    #[serde(default)]
    pub grid_width_pallets: Option<u32>,

    /// Dead space held back in multi-drop mode
    #[serde(default = "default_multi_drop_allowance")]
    pub multi_drop_allowance: CapacityAllowance,

    /// Vehicle catalog TOML replacing the built-in list
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Stillage and pallet constants
    #[serde(default)]
    pub constants: LoadConstants,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_multi_drop_allowance() -> CapacityAllowance {
    // one pallet-length access bay across the bed
    CapacityAllowance {
        floor_area_m2: 2.4,
        cube_m3: 6.0,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            default_vehicle: None,
            fill_order: FillOrder::default(),
            double_stack: false,
            grid_width_pallets: None,
            multi_drop_allowance: default_multi_drop_allowance(),
            catalog_path: None,
            constants: LoadConstants::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("wagon-calc");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path, default when missing
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            log::debug!("loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Wagon Calc Configuration")?;
        writeln!(f, "========================")?;
        writeln!(f)?;
        writeln!(f, "Output format:     {}", self.output_format)?;
        writeln!(
            f,
            "Default vehicle:   {}",
            self.default_vehicle.as_deref().unwrap_or("(first in catalog)")
        )?;
        writeln!(f, "Fill order:        {}", self.fill_order)?;
        writeln!(f, "Double stack:      {}", self.double_stack)?;
        writeln!(
            f,
            "Grid width:        {}",
            self.grid_width_pallets
                .map(|w| format!("{} pallets", w))
                .unwrap_or_else(|| "(from vehicle width)".to_string())
        )?;
        writeln!(
            f,
            "Multi-drop space:  {:.2} m², {:.2} m³",
            self.multi_drop_allowance.floor_area_m2, self.multi_drop_allowance.cube_m3
        )?;
        writeln!(
            f,
            "Catalog:           {}",
            self.catalog_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string())
        )?;
        writeln!(f)?;
        let c = &self.constants;
        writeln!(f, "Doors per stillage: {}", c.doors_per_stillage)?;
        writeln!(
            f,
            "Stillage:          {:.2} x {:.2} m, {:.0} kg",
            c.stillage_length_m, c.stillage_width_m, c.stillage_weight_kg
        )?;
        writeln!(
            f,
            "Pallet:            {:.2} x {:.2} m, {:.0} kg",
            c.pallet_length_m, c.pallet_width_m, c.pallet_weight_kg
        )?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:       {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.constants.doors_per_stillage, 14);
    }

    #[test]
    fn test_save_and_load_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            default_vehicle: Some("luton".to_string()),
            double_stack: true,
            fill_order: FillOrder::PalletsFirst,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_display_mentions_constants() {
        let text = Config::default().to_string();
        assert!(text.contains("Doors per stillage: 14"));
        assert!(text.contains("(built-in)"));
    }
}
