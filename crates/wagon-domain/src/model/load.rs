//! Load constants and per-category load lines

use serde::{Deserialize, Serialize};

/// Per-unit physical constants for stillages and pallets
///
/// Footprints are length x width in metres, weights in kg. These are policy
/// values and may be overridden from the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadConstants {
    #[serde(default = "default_doors_per_stillage")]
    pub doors_per_stillage: u32,
    #[serde(default = "default_stillage_length")]
    pub stillage_length_m: f64,
    #[serde(default = "default_stillage_width")]
    pub stillage_width_m: f64,
    #[serde(default = "default_stillage_height")]
    pub stillage_height_m: f64,
    /// Loaded stillage weight (frame plus a full set of doors)
    #[serde(default = "default_stillage_weight")]
    pub stillage_weight_kg: f64,
    #[serde(default = "default_pallet_length")]
    pub pallet_length_m: f64,
    #[serde(default = "default_pallet_width")]
    pub pallet_width_m: f64,
    #[serde(default = "default_pallet_height")]
    pub pallet_height_m: f64,
    #[serde(default = "default_pallet_weight")]
    pub pallet_weight_kg: f64,
    #[serde(default = "default_true")]
    pub stillage_requires_upright: bool,
    #[serde(default)]
    pub pallet_requires_upright: bool,
}

fn default_doors_per_stillage() -> u32 {
    14
}

fn default_stillage_length() -> f64 {
    1.8
}

fn default_stillage_width() -> f64 {
    1.5
}

fn default_stillage_height() -> f64 {
    2.2
}

fn default_stillage_weight() -> f64 {
    620.0
}

fn default_pallet_length() -> f64 {
    1.2
}

fn default_pallet_width() -> f64 {
    1.0
}

fn default_pallet_height() -> f64 {
    1.2
}

fn default_pallet_weight() -> f64 {
    450.0
}

fn default_true() -> bool {
    true
}

impl Default for LoadConstants {
    fn default() -> Self {
        Self {
            doors_per_stillage: default_doors_per_stillage(),
            stillage_length_m: default_stillage_length(),
            stillage_width_m: default_stillage_width(),
            stillage_height_m: default_stillage_height(),
            stillage_weight_kg: default_stillage_weight(),
            pallet_length_m: default_pallet_length(),
            pallet_width_m: default_pallet_width(),
            pallet_height_m: default_pallet_height(),
            pallet_weight_kg: default_pallet_weight(),
            stillage_requires_upright: true,
            pallet_requires_upright: false,
        }
    }
}

impl LoadConstants {
    pub fn stillage_area(&self) -> f64 {
        self.stillage_length_m * self.stillage_width_m
    }

    pub fn stillage_volume(&self) -> f64 {
        self.stillage_area() * self.stillage_height_m
    }

    pub fn pallet_area(&self) -> f64 {
        self.pallet_length_m * self.pallet_width_m
    }

    pub fn pallet_volume(&self) -> f64 {
        self.pallet_area() * self.pallet_height_m
    }

    /// How many pallet footprints one stillage covers
    pub fn pallets_per_stillage(&self) -> f64 {
        let pallet = self.pallet_area();
        if pallet > 0.0 {
            self.stillage_area() / pallet
        } else {
            0.0
        }
    }
}

/// Load category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadKind {
    /// Doors packed into stillages
    Stillage,
    Pallet,
}

impl LoadKind {
    pub fn label(&self) -> &'static str {
        match self {
            LoadKind::Stillage => "Door stillages",
            LoadKind::Pallet => "Pallets",
        }
    }
}

/// One input category after derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadLine {
    pub kind: LoadKind,
    /// Quantity as entered, after clamping (doors or pallets)
    pub quantity: f64,
    /// Units carried: whole stillages, or pallets as entered
    pub units: f64,
    /// Units counted against floor space (after stacking)
    pub floor_units: f64,
    pub unit_area_m2: f64,
    pub unit_weight_kg: f64,
    pub unit_volume_m3: f64,
    pub requires_upright: bool,
}

impl LoadLine {
    /// Whole blocks drawn for this line; a part pallet takes a full block
    pub fn blocks(&self) -> u64 {
        self.units.ceil() as u64
    }

    pub fn floor_area(&self) -> f64 {
        self.floor_units * self.unit_area_m2
    }

    pub fn volume(&self) -> f64 {
        self.units * self.unit_volume_m3
    }

    pub fn weight(&self) -> f64 {
        self.units * self.unit_weight_kg
    }
}
