//! Floor layout types
//!
//! The floor is a grid of quarter-pallet cells: a pallet covers a 4x4 block.
//! Stillage blocks approximate their real footprint ratio in whole cells.

use serde::{Deserialize, Serialize};

use super::load::LoadConstants;

/// Cells along one side of a pallet
pub const CELLS_PER_PALLET_SIDE: u32 = 4;
/// Cells covered by one pallet footprint
pub const CELLS_PER_PALLET: u32 = CELLS_PER_PALLET_SIDE * CELLS_PER_PALLET_SIDE;
/// Longest block side in cells (sixteen pallet lengths)
pub const MAX_BLOCK_SIDE: u32 = CELLS_PER_PALLET_SIDE * 16;
/// Widest grid that can be drawn, in pallet widths
pub const MAX_GRID_WIDTH_PALLETS: u32 = 16;
/// Floor capacity beyond this many pallet footprints is not drawn
pub const MAX_DRAWN_PALLETS: u32 = 2_000;
/// Overflow blocks listed by label; the rest are only counted
pub const MAX_LISTED_OVERFLOW: usize = 100;

/// Which category is placed first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillOrder {
    #[default]
    DoorsFirst,
    PalletsFirst,
}

impl std::str::FromStr for FillOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "doors-first" | "doors" | "door" => Ok(FillOrder::DoorsFirst),
            "pallets-first" | "pallets" | "pallet" => Ok(FillOrder::PalletsFirst),
            other => Err(format!(
                "unknown fill order '{}', expected doors-first or pallets-first",
                other
            )),
        }
    }
}

impl std::fmt::Display for FillOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillOrder::DoorsFirst => write!(f, "doors-first"),
            FillOrder::PalletsFirst => write!(f, "pallets-first"),
        }
    }
}

/// Block sizes in cells (width across the bed, depth along it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockGeometry {
    pub pallet_width: u32,
    pub pallet_depth: u32,
    pub stillage_width: u32,
    pub stillage_depth: u32,
}

impl Default for BlockGeometry {
    fn default() -> Self {
        Self::from_constants(&LoadConstants::default())
    }
}

impl BlockGeometry {
    /// Derive the stillage block from the real footprints.
    ///
    /// Each side is rounded to the nearest quarter pallet, so the block area
    /// only approximates the true ratio when it does not divide evenly. Sides
    /// are kept within 1..=`MAX_BLOCK_SIDE`.
    pub fn from_constants(constants: &LoadConstants) -> Self {
        let side = f64::from(CELLS_PER_PALLET_SIDE);
        let cells = |stillage: f64, pallet: f64| -> u32 {
            if pallet > 0.0 && stillage.is_finite() && stillage > 0.0 {
                let n = (stillage / pallet * side).round();
                n.clamp(1.0, f64::from(MAX_BLOCK_SIDE)) as u32
            } else {
                CELLS_PER_PALLET_SIDE
            }
        };
        Self {
            pallet_width: CELLS_PER_PALLET_SIDE,
            pallet_depth: CELLS_PER_PALLET_SIDE,
            stillage_width: cells(constants.stillage_width_m, constants.pallet_width_m),
            stillage_depth: cells(constants.stillage_length_m, constants.pallet_length_m),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    /// One door stillage
    Door,
    /// One pallet on the floor
    Pallet,
    /// Double-stacked pallets sharing one footprint
    Stack { pallets: u8 },
}

impl ItemKind {
    /// Physical units this block stands for
    pub fn units(&self) -> u32 {
        match self {
            ItemKind::Door | ItemKind::Pallet => 1,
            ItemKind::Stack { pallets } => u32::from(*pallets),
        }
    }

    /// Single character used in the diagram
    pub fn symbol(&self) -> char {
        match self {
            ItemKind::Door => 'D',
            ItemKind::Pallet => 'P',
            ItemKind::Stack { .. } => 'S',
        }
    }
}

/// A block to place on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutItem {
    pub kind: ItemKind,
    pub label: String,
    pub width: u32,
    pub depth: u32,
}

impl LayoutItem {
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.depth)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub item: LayoutItem,
    pub x: u32,
    pub y: u32,
}

/// Outcome of one layout pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    /// Placed blocks in placement order
    pub placements: Vec<Placement>,
    /// First blocks that did not fit, in source order, at most
    /// `MAX_LISTED_OVERFLOW` of them
    pub overflow: Vec<LayoutItem>,
    /// Every block that did not fit, listed or not
    pub overflow_blocks: u64,
    pub grid_width: u32,
    /// Floor capacity in cells, rounded down
    pub capacity_cells: u64,
    pub placed_cells: u64,
    pub overflow_cells: u64,
}

impl PlacementResult {
    /// Placed area in pallet equivalents
    pub fn placed_area(&self) -> f64 {
        self.placed_cells as f64 / f64::from(CELLS_PER_PALLET)
    }

    /// Overflow area in pallet equivalents
    pub fn overflow_area(&self) -> f64 {
        self.overflow_cells as f64 / f64::from(CELLS_PER_PALLET)
    }

    /// Depth of the grid actually used, in cells
    pub fn depth_used(&self) -> u32 {
        self.placements
            .iter()
            .map(|p| p.y.saturating_add(p.item.depth))
            .max()
            .unwrap_or(0)
    }

    /// Overflow blocks beyond the listed ones
    pub fn unlisted_overflow(&self) -> u64 {
        self.overflow_blocks.saturating_sub(self.overflow.len() as u64)
    }

    pub fn all_placed(&self) -> bool {
        self.overflow_blocks == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stillage_block_is_six_by_six() {
        let g = BlockGeometry::default();
        assert_eq!((g.pallet_width, g.pallet_depth), (4, 4));
        assert_eq!((g.stillage_width, g.stillage_depth), (6, 6));
    }

    #[test]
    fn test_geometry_tracks_constant_changes() {
        let constants = LoadConstants {
            stillage_length_m: 2.4,
            stillage_width_m: 1.0,
            ..LoadConstants::default()
        };
        let g = BlockGeometry::from_constants(&constants);
        assert_eq!((g.stillage_width, g.stillage_depth), (4, 8));
    }

    #[test]
    fn test_geometry_never_zero_sized() {
        let constants = LoadConstants {
            stillage_width_m: 0.01,
            ..LoadConstants::default()
        };
        let g = BlockGeometry::from_constants(&constants);
        assert_eq!(g.stillage_width, 1);
    }

    #[test]
    fn test_geometry_from_oversized_stillage_is_capped() {
        let constants = LoadConstants {
            stillage_length_m: 1e6,
            stillage_width_m: 1e6,
            ..LoadConstants::default()
        };
        let g = BlockGeometry::from_constants(&constants);
        assert_eq!((g.stillage_width, g.stillage_depth), (MAX_BLOCK_SIDE, MAX_BLOCK_SIDE));
    }

    #[test]
    fn test_area_of_widest_block_does_not_wrap() {
        let item = LayoutItem {
            kind: ItemKind::Door,
            label: "S1".to_string(),
            width: u32::MAX,
            depth: u32::MAX,
        };
        assert_eq!(item.area(), u64::from(u32::MAX) * u64::from(u32::MAX));
    }

    #[test]
    fn test_fill_order_parse() {
        assert_eq!("doors-first".parse::<FillOrder>(), Ok(FillOrder::DoorsFirst));
        assert_eq!("Pallets".parse::<FillOrder>(), Ok(FillOrder::PalletsFirst));
        assert!("sideways".parse::<FillOrder>().is_err());
    }

    #[test]
    fn test_stack_units() {
        assert_eq!(ItemKind::Stack { pallets: 2 }.units(), 2);
        assert_eq!(ItemKind::Door.units(), 1);
    }
}
