//! Utilisation calculator
//!
//! Converts door and pallet counts into floor, cube and weight totals and
//! compares them with a vehicle's capacity. Never fails: bad input is clamped
//! and zero capacity gives a zero ratio.

use crate::model::{
    Axis, AxisUsage, Capacity, Incompatibility, LoadConstants, LoadKind, LoadLine,
    PalletEquivalents, UtilisationResult, Vehicle,
};

/// Clamp a raw quantity to a usable non-negative value
pub fn clamp_quantity(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Stillages needed for `doors`, as a whole number
fn stillage_count(doors: f64, doors_per_stillage: u32) -> f64 {
    if doors_per_stillage == 0 {
        return 0.0;
    }
    (clamp_quantity(doors) / f64::from(doors_per_stillage)).ceil()
}

/// Stillages needed for `doors`; zero when `doors_per_stillage` is zero
pub fn stillages_required(doors: f64, doors_per_stillage: u32) -> u64 {
    stillage_count(doors, doors_per_stillage) as u64
}

/// Pallets counted against floor space; a stack of two takes one footprint
pub fn effective_floor_pallets(pallets: f64, double_stack: bool) -> f64 {
    let pallets = clamp_quantity(pallets);
    if double_stack {
        (pallets / 2.0).ceil()
    } else {
        pallets
    }
}

/// used / capacity, or 0 for a zero or missing capacity
pub fn ratio(used: f64, capacity: f64) -> f64 {
    if capacity.is_finite() && capacity > 0.0 {
        used / capacity
    } else {
        0.0
    }
}

/// Build the stillage and pallet load lines.
///
/// Volume and weight count pallets as entered; only the floor line is
/// affected by stacking.
pub fn load_lines(
    door_qty: f64,
    pallet_qty: f64,
    double_stack: bool,
    constants: &LoadConstants,
) -> Vec<LoadLine> {
    let doors = clamp_quantity(door_qty);
    let pallets = clamp_quantity(pallet_qty);
    let stillages = stillage_count(doors, constants.doors_per_stillage);

    vec![
        LoadLine {
            kind: LoadKind::Stillage,
            quantity: doors,
            units: stillages,
            floor_units: stillages,
            unit_area_m2: constants.stillage_area(),
            unit_weight_kg: constants.stillage_weight_kg,
            unit_volume_m3: constants.stillage_volume(),
            requires_upright: constants.stillage_requires_upright,
        },
        LoadLine {
            kind: LoadKind::Pallet,
            quantity: pallets,
            units: pallets,
            floor_units: effective_floor_pallets(pallets, double_stack),
            unit_area_m2: constants.pallet_area(),
            unit_weight_kg: constants.pallet_weight_kg,
            unit_volume_m3: constants.pallet_volume(),
            requires_upright: constants.pallet_requires_upright,
        },
    ]
}

/// Utilisation of `vehicle` at its full capacity
pub fn compute_utilisation(
    door_qty: f64,
    pallet_qty: f64,
    vehicle: &Vehicle,
    double_stack: bool,
    constants: &LoadConstants,
) -> UtilisationResult {
    compute_utilisation_against(
        door_qty,
        pallet_qty,
        vehicle,
        &vehicle.capacity(),
        double_stack,
        constants,
    )
}

/// Utilisation against an explicit (possibly reduced) capacity
pub fn compute_utilisation_against(
    door_qty: f64,
    pallet_qty: f64,
    vehicle: &Vehicle,
    capacity: &Capacity,
    double_stack: bool,
    constants: &LoadConstants,
) -> UtilisationResult {
    let lines = load_lines(door_qty, pallet_qty, double_stack, constants);

    let floor_used: f64 = lines.iter().map(LoadLine::floor_area).sum();
    let cube_used: f64 = lines.iter().map(LoadLine::volume).sum();
    let weight_used: f64 = lines.iter().map(LoadLine::weight).sum();

    let usage = |axis: Axis, used: f64, cap: f64| AxisUsage {
        axis,
        used,
        capacity: cap,
        ratio: ratio(used, cap),
    };
    let floor = usage(Axis::Floor, floor_used, capacity.floor_area_m2);
    let cube = usage(Axis::Cube, cube_used, capacity.cube_m3);
    let weight = usage(Axis::Weight, weight_used, capacity.payload_kg);

    let (limiting, overall) = limiting_axis(&[floor, cube, weight]);

    let incompatibilities = if vehicle.upright_allowed {
        Vec::new()
    } else {
        lines
            .iter()
            .filter(|l| l.requires_upright && l.units > 0.0)
            .map(|l| Incompatibility {
                vehicle_id: vehicle.id.clone(),
                kind: l.kind,
                units: l.blocks(),
            })
            .collect()
    };

    let pallet_area = constants.pallet_area();
    let capacity_equiv = ratio(capacity.floor_area_m2, pallet_area);
    let used_equiv = ratio(floor_used, pallet_area);

    log::debug!(
        "utilisation {}: floor {:.3} cube {:.3} weight {:.3} -> {} ({:.3})",
        vehicle.id,
        floor.ratio,
        cube.ratio,
        weight.ratio,
        limiting,
        overall
    );

    UtilisationResult {
        vehicle_id: vehicle.id.clone(),
        double_stack,
        lines,
        floor,
        cube,
        weight,
        limiting,
        overall,
        pallet_equivalents: PalletEquivalents {
            capacity: capacity_equiv,
            used: used_equiv,
            remaining: capacity_equiv - used_equiv,
        },
        incompatibilities,
    }
}

/// Highest ratio; ties keep the earliest axis
fn limiting_axis(usages: &[AxisUsage]) -> (Axis, f64) {
    let mut best = (Axis::Floor, 0.0);
    for (i, u) in usages.iter().enumerate() {
        if i == 0 || u.ratio > best.1 {
            best = (u.axis, u.ratio);
        }
    }
    best
}
