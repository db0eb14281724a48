//! Floor-layout renderer
//!
//! Single left-to-right, top-to-bottom shelf pass over the blocks. Placed
//! blocks never move and overflowed blocks keep their source order. This is
//! an illustration of the load, not a packing solver.
//!
//! Blocks are produced on demand, so the work done is bounded by the floor
//! capacity rather than by the quantities entered.

use crate::model::layout::{
    CELLS_PER_PALLET, CELLS_PER_PALLET_SIDE, MAX_DRAWN_PALLETS, MAX_GRID_WIDTH_PALLETS,
    MAX_LISTED_OVERFLOW,
};
use crate::model::{BlockGeometry, FillOrder, ItemKind, LayoutItem, Placement, PlacementResult};

/// Door-stillage blocks, labelled S1..Sn
pub fn door_blocks(stillages: u64, geometry: &BlockGeometry) -> impl Iterator<Item = LayoutItem> {
    let (width, depth) = (geometry.stillage_width, geometry.stillage_depth);
    (1..=stillages).map(move |n| LayoutItem {
        kind: ItemKind::Door,
        label: format!("S{}", n),
        width,
        depth,
    })
}

/// Blocks needed for `pallets`: one each, or one per pair when stacking
pub fn pallet_block_count(pallets: u64, double_stack: bool) -> u64 {
    if double_stack {
        pallets.div_ceil(2)
    } else {
        pallets
    }
}

/// Pallet blocks, merged pairwise into stacks when double-stacking
pub fn pallet_blocks(
    pallets: u64,
    double_stack: bool,
    geometry: &BlockGeometry,
) -> impl Iterator<Item = LayoutItem> {
    let (width, depth) = (geometry.pallet_width, geometry.pallet_depth);
    (0..pallet_block_count(pallets, double_stack)).map(move |i| {
        let (kind, label) = if !double_stack {
            (ItemKind::Pallet, format!("P{}", i + 1))
        } else {
            let first = 2 * i + 1;
            if first < pallets {
                (ItemKind::Stack { pallets: 2 }, format!("P{}+P{}", first, first + 1))
            } else {
                (ItemKind::Stack { pallets: 1 }, format!("P{}", first))
            }
        };
        LayoutItem {
            kind,
            label,
            width,
            depth,
        }
    })
}

/// Capacity in cells, always rounded down and capped at `MAX_DRAWN_PALLETS`
pub fn capacity_cells(capacity_pallets: f64) -> u64 {
    if !capacity_pallets.is_finite() || capacity_pallets <= 0.0 {
        return 0;
    }
    let max = u64::from(MAX_DRAWN_PALLETS) * u64::from(CELLS_PER_PALLET);
    ((capacity_pallets * f64::from(CELLS_PER_PALLET)).floor() as u64).min(max)
}

/// Lay out door stillages and pallets on a grid `grid_width_pallets` wide.
///
/// The width is kept within 1..=`MAX_GRID_WIDTH_PALLETS`.
pub fn layout_floor(
    capacity_pallets: f64,
    door_stillages: u64,
    pallet_qty: u64,
    grid_width_pallets: u32,
    fill_order: FillOrder,
    double_stack: bool,
    geometry: &BlockGeometry,
) -> PlacementResult {
    let grid_width = grid_width_pallets.clamp(1, MAX_GRID_WIDTH_PALLETS) * CELLS_PER_PALLET_SIDE;
    let mut packer = ShelfPacker::new(grid_width, capacity_cells(capacity_pallets));

    let pallet_count = pallet_block_count(pallet_qty, double_stack);
    match fill_order {
        FillOrder::DoorsFirst => {
            packer.push_run(door_stillages, door_blocks(door_stillages, geometry));
            packer.push_run(pallet_count, pallet_blocks(pallet_qty, double_stack, geometry));
        }
        FillOrder::PalletsFirst => {
            packer.push_run(pallet_count, pallet_blocks(pallet_qty, double_stack, geometry));
            packer.push_run(door_stillages, door_blocks(door_stillages, geometry));
        }
    }
    let result = packer.finish();

    log::debug!(
        "layout: {} placed, {} overflow, {}/{} cells on a {}-cell wide grid",
        result.placements.len(),
        result.overflow_blocks,
        result.placed_cells,
        result.capacity_cells,
        result.grid_width
    );

    result
}

/// Shelf packer over a grid `grid_width` cells wide holding at most
/// `capacity` cells of blocks
#[derive(Debug)]
pub struct ShelfPacker {
    result: PlacementResult,
    x: u32,
    y: u32,
    shelf: u32,
}

impl ShelfPacker {
    pub fn new(grid_width: u32, capacity: u64) -> Self {
        Self {
            result: PlacementResult {
                grid_width,
                capacity_cells: capacity,
                ..PlacementResult::default()
            },
            x: 0,
            y: 0,
            shelf: 0,
        }
    }

    /// Place one block, or overflow it. Returns true when placed.
    pub fn push(&mut self, item: LayoutItem) -> bool {
        let grid_width = self.result.grid_width;
        if item.width > grid_width {
            self.overflow(item);
            return false;
        }

        if self.x.saturating_add(item.width) > grid_width {
            self.x = 0;
            self.y = self.y.saturating_add(self.shelf);
            self.shelf = 0;
        }

        let area = item.area();
        if self.result.placed_cells.saturating_add(area) > self.result.capacity_cells {
            self.overflow(item);
            return false;
        }

        self.result.placed_cells += area;
        self.shelf = self.shelf.max(item.depth);
        let width = item.width;
        self.result.placements.push(Placement {
            item,
            x: self.x,
            y: self.y,
        });
        self.x += width;
        true
    }

    /// Pack a run of `count` blocks of one size.
    ///
    /// After the first block of a run overflows, every later block of the
    /// run overflows too; those are counted and only the first few built.
    pub fn push_run<I>(&mut self, count: u64, mut blocks: I)
    where
        I: Iterator<Item = LayoutItem>,
    {
        let mut taken = 0u64;
        let mut overflowed_area = None;
        for item in blocks.by_ref() {
            taken += 1;
            let area = item.area();
            if !self.push(item) {
                overflowed_area = Some(area);
                break;
            }
        }
        let Some(area) = overflowed_area else {
            return;
        };

        let room = MAX_LISTED_OVERFLOW.saturating_sub(self.result.overflow.len());
        for item in blocks.by_ref().take(room) {
            taken += 1;
            self.overflow(item);
        }
        let rest = count.saturating_sub(taken);
        self.count_overflow(rest, area.saturating_mul(rest));
    }

    pub fn finish(self) -> PlacementResult {
        self.result
    }

    fn overflow(&mut self, item: LayoutItem) {
        self.count_overflow(1, item.area());
        if self.result.overflow.len() < MAX_LISTED_OVERFLOW {
            self.result.overflow.push(item);
        }
    }

    fn count_overflow(&mut self, blocks: u64, cells: u64) {
        self.result.overflow_blocks = self.result.overflow_blocks.saturating_add(blocks);
        self.result.overflow_cells = self.result.overflow_cells.saturating_add(cells);
    }
}
