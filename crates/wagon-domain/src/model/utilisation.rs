//! Utilisation result types

use serde::{Deserialize, Serialize};

use super::load::{LoadKind, LoadLine};

/// Capacity axis. Declaration order is the tie-break order for the limiting axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Floor,
    Cube,
    Weight,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Floor, Axis::Cube, Axis::Weight];

    pub fn label(&self) -> &'static str {
        match self {
            Axis::Floor => "Floor space",
            Axis::Cube => "Cube",
            Axis::Weight => "Weight",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Axis::Floor => "m²",
            Axis::Cube => "m³",
            Axis::Weight => "kg",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Used vs capacity on one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisUsage {
    pub axis: Axis,
    pub used: f64,
    pub capacity: f64,
    /// used / capacity, 0 when capacity is zero
    pub ratio: f64,
}

impl AxisUsage {
    pub fn percent(&self) -> f64 {
        self.ratio * 100.0
    }

    pub fn remaining(&self) -> f64 {
        self.capacity - self.used
    }
}

/// Upright-only load on a vehicle that cannot take upright stillages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incompatibility {
    pub vehicle_id: String,
    pub kind: LoadKind,
    pub units: u64,
}

impl std::fmt::Display for Incompatibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} x {} need upright carriage, not permitted on {}",
            self.units,
            self.kind.label().to_lowercase(),
            self.vehicle_id
        )
    }
}

/// Floor space expressed in pallet footprints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PalletEquivalents {
    pub capacity: f64,
    pub used: f64,
    /// Negative when over capacity
    pub remaining: f64,
}

/// Load grade from the overall ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadGrade {
    /// Under 80%
    Light,
    /// 80-95%
    Good,
    /// 95-100%
    Full,
    /// Over 100%
    Over,
}

impl LoadGrade {
    pub fn from_ratio(ratio: f64) -> Self {
        match ratio {
            r if r < 0.80 => LoadGrade::Light,
            r if r < 0.95 => LoadGrade::Good,
            r if r <= 1.00 => LoadGrade::Full,
            _ => LoadGrade::Over,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadGrade::Light => "light",
            LoadGrade::Good => "good",
            LoadGrade::Full => "full",
            LoadGrade::Over => "over capacity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilisationResult {
    pub vehicle_id: String,
    pub double_stack: bool,
    pub lines: Vec<LoadLine>,
    pub floor: AxisUsage,
    pub cube: AxisUsage,
    pub weight: AxisUsage,
    pub limiting: Axis,
    /// Maximum of the three ratios
    pub overall: f64,
    pub pallet_equivalents: PalletEquivalents,
    /// Hard constraint violations, reported apart from the ratios
    #[serde(default)]
    pub incompatibilities: Vec<Incompatibility>,
}

impl UtilisationResult {
    pub fn axis(&self, axis: Axis) -> &AxisUsage {
        match axis {
            Axis::Floor => &self.floor,
            Axis::Cube => &self.cube,
            Axis::Weight => &self.weight,
        }
    }

    pub fn axes(&self) -> [&AxisUsage; 3] {
        [&self.floor, &self.cube, &self.weight]
    }

    pub fn stillages(&self) -> u64 {
        self.units_of(LoadKind::Stillage)
    }

    pub fn pallets(&self) -> u64 {
        self.units_of(LoadKind::Pallet)
    }

    /// Whole blocks of one kind, as laid out on the floor
    fn units_of(&self, kind: LoadKind) -> u64 {
        self.lines
            .iter()
            .filter(|l| l.kind == kind)
            .map(LoadLine::blocks)
            .fold(0, u64::saturating_add)
    }

    pub fn is_over_capacity(&self) -> bool {
        self.overall > 1.0
    }

    /// False when the load breaks a hard constraint, regardless of ratios
    pub fn is_permitted(&self) -> bool {
        self.incompatibilities.is_empty()
    }

    pub fn grade(&self) -> LoadGrade {
        LoadGrade::from_ratio(self.overall)
    }
}
