//! Text rendering of the floor layout and fill figures

use crate::model::layout::{CELLS_PER_PALLET_SIDE, MAX_GRID_WIDTH_PALLETS};
use crate::model::{PlacementResult, UtilisationResult};

/// Draw the placement as a character grid, one character per cell.
///
/// Rows run along the bed from the headboard. Free cells inside the used
/// depth are shown as `.`; overflowed blocks are listed underneath.
pub fn render_layout_diagram(layout: &PlacementResult) -> String {
    let max_width = MAX_GRID_WIDTH_PALLETS * CELLS_PER_PALLET_SIDE;
    let width = layout.grid_width.min(max_width) as usize;
    let depth = layout.depth_used() as usize;
    let mut grid = vec![vec!['.'; width]; depth];

    for p in &layout.placements {
        let symbol = p.item.kind.symbol();
        for row in grid
            .iter_mut()
            .skip(p.y as usize)
            .take(p.item.depth as usize)
        {
            for cell in row
                .iter_mut()
                .skip(p.x as usize)
                .take(p.item.width as usize)
            {
                *cell = symbol;
            }
        }
    }

    let mut out = String::new();
    let border = format!("+{}+\n", "-".repeat(width));
    out.push_str(&border);
    for row in &grid {
        out.push('|');
        out.extend(row.iter());
        out.push_str("|\n");
    }
    out.push_str(&border);
    out.push_str("D = door stillage, P = pallet, S = double stack\n");
    out.push_str(&format!(
        "Placed: {} blocks ({:.2} pallet eq.)\n",
        layout.placements.len(),
        layout.placed_area()
    ));

    if !layout.all_placed() {
        let mut labels = layout
            .overflow
            .iter()
            .map(|i| i.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let unlisted = layout.unlisted_overflow();
        if unlisted > 0 {
            labels.push_str(&format!(" and {} more", unlisted));
        }
        out.push_str(&format!(
            "Overflow: {} blocks ({:.2} pallet eq.): {}\n",
            layout.overflow_blocks,
            layout.overflow_area(),
            labels
        ));
    }

    out
}

/// Horizontal fill bar: `#` used, `-` remaining, `!` over capacity
pub fn fill_bar(result: &UtilisationResult, width: usize) -> String {
    let eq = &result.pallet_equivalents;
    if eq.capacity <= 0.0 {
        return format!("[{}] set a vehicle capacity", "?".repeat(width));
    }

    if eq.used <= eq.capacity {
        let filled = ((eq.used / eq.capacity) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
    } else {
        // whole bar is capacity + over, scaled to width
        let cap = ((eq.capacity / eq.used) * width as f64).round() as usize;
        let cap = cap.min(width);
        format!("[{}{}]", "#".repeat(cap), "!".repeat(width - cap))
    }
}

/// Gauge clamped to 0-100% with the true percentage alongside
pub fn gauge(ratio: f64, width: usize) -> String {
    let clamped = ratio.clamp(0.0, 1.0);
    let filled = ((clamped * width as f64).round() as usize).min(width);
    format!(
        "[{}{}] {:.1}%",
        "=".repeat(filled),
        " ".repeat(width - filled),
        ratio * 100.0
    )
}
