//! Plain-text utilisation report

use crate::model::{LoadConstants, LoadKind, SessionEntry, UtilisationResult, Vehicle};
use crate::service::diagram::{fill_bar, gauge};

pub fn generate_utilisation_report(
    result: &UtilisationResult,
    vehicle: &Vehicle,
    constants: &LoadConstants,
) -> String {
    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("              Wagon Load Utilisation              \n");
    report.push_str("==================================================\n\n");
    report.push_str(&format!("Vehicle:        {} ({})\n", vehicle.name, vehicle.id));
    report.push_str(&format!(
        "Double stack:   {}\n\n",
        if result.double_stack { "yes" } else { "no" }
    ));

    report.push_str("[Load]\n");
    for line in &result.lines {
        match line.kind {
            LoadKind::Stillage => report.push_str(&format!(
                "  Doors:          {} -> {} stillages (ceil {} / {})\n",
                line.quantity, line.units, line.quantity, constants.doors_per_stillage
            )),
            LoadKind::Pallet => report.push_str(&format!(
                "  Pallets:        {} ({} on the floor)\n",
                line.units, line.floor_units
            )),
        }
    }
    report.push('\n');

    report.push_str("[Utilisation]\n");
    report.push_str(&format!(
        "  {:<12} {:>10} {:>10} {:>8}\n",
        "Axis", "Used", "Capacity", "Ratio"
    ));
    report.push_str(&format!("  {}\n", "-".repeat(43)));
    for usage in result.axes() {
        let marker = if usage.axis == result.limiting { " <" } else { "" };
        report.push_str(&format!(
            "  {:<12} {:>10.2} {:>10.2} {:>7.1}%{}\n",
            usage.axis.label(),
            usage.used,
            usage.capacity,
            usage.percent(),
            marker
        ));
    }
    report.push('\n');
    report.push_str(&format!(
        "  Limiting:     {} ({:.1}%, {})\n",
        result.limiting,
        result.overall * 100.0,
        result.grade().label()
    ));
    report.push_str(&format!("  Gauge:        {}\n", gauge(result.overall, 20)));
    report.push('\n');

    let eq = &result.pallet_equivalents;
    report.push_str("[Floor in pallet equivalents]\n");
    report.push_str(&format!("  Capacity:     {:.2}\n", eq.capacity));
    report.push_str(&format!("  Used:         {:.2}\n", eq.used));
    if eq.remaining >= 0.0 {
        report.push_str(&format!("  Remaining:    {:.2}\n", eq.remaining));
    } else {
        report.push_str(&format!("  Over by:      {:.2}\n", -eq.remaining));
    }
    report.push_str(&format!("  Fill:         {}\n", fill_bar(result, 30)));
    report.push('\n');

    if !result.is_permitted() {
        report.push_str("[NOT PERMITTED]\n");
        for incompatibility in &result.incompatibilities {
            report.push_str(&format!("  {}\n", incompatibility));
        }
        report.push('\n');
    } else if result.is_over_capacity() {
        report.push_str(&format!(
            "Over capacity on {} ({:.1}% utilised).\n\n",
            result.limiting.label().to_lowercase(),
            result.overall * 100.0
        ));
    } else {
        report.push_str(&format!(
            "Within capacity ({:.1}% utilised).\n\n",
            result.overall * 100.0
        ));
    }

    report.push_str("==================================================\n");
    report
}

/// Table of session log entries
pub fn generate_session_report(entries: &[SessionEntry]) -> String {
    if entries.is_empty() {
        return "No calculations in this session.\n".to_string();
    }

    let mut report = String::new();
    report.push_str(&format!(
        "{:<4} {:<9} {:<14} {:>6} {:>7} {:>6} {:>7} {:>7} {:>7} {:<12} {:>4}\n",
        "#",
        "Time",
        "Vehicle",
        "Doors",
        "Pallets",
        "Stack",
        "Floor",
        "Cube",
        "Weight",
        "Limiting",
        "OK"
    ));
    report.push_str(&"-".repeat(92));
    report.push('\n');
    for (i, e) in entries.iter().enumerate() {
        report.push_str(&format!(
            "{:<4} {:<9} {:<14} {:>6} {:>7} {:>6} {:>6.1}% {:>6.1}% {:>6.1}% {:<12} {:>4}\n",
            i + 1,
            e.timestamp.format("%H:%M:%S"),
            truncate_str(&e.inputs.vehicle_id, 14),
            e.inputs.doors,
            e.inputs.pallets,
            if e.inputs.double_stack { "yes" } else { "no" },
            e.floor_ratio * 100.0,
            e.cube_ratio * 100.0,
            e.weight_ratio * 100.0,
            e.limiting.label(),
            if e.permitted { "yes" } else { "NO" }
        ));
    }
    report
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FillOrder, PlacementResult, SessionInputs};
    use crate::service::utilisation::compute_utilisation;

    fn vehicle(upright_allowed: bool) -> Vehicle {
        Vehicle {
            id: "rigid-7.5t".to_string(),
            name: "7.5t rigid".to_string(),
            length_m: 6.0,
            width_m: 2.4,
            height_m: 2.4,
            floor_area_m2: None,
            cube_m3: None,
            payload_kg: 2500.0,
            upright_allowed,
        }
    }

    #[test]
    fn test_report_within_capacity() {
        let constants = LoadConstants::default();
        let r = compute_utilisation(14.0, 1.0, &vehicle(true), false, &constants);
        let report = generate_utilisation_report(&r, &vehicle(true), &constants);
        assert!(report.contains("Wagon Load Utilisation"));
        assert!(report.contains("1 stillages"));
        assert!(report.contains("Within capacity"));
        assert!(report.contains("Remaining:"));
    }

    #[test]
    fn test_report_over_capacity() {
        let constants = LoadConstants::default();
        let r = compute_utilisation(0.0, 14.0, &vehicle(true), false, &constants);
        let report = generate_utilisation_report(&r, &vehicle(true), &constants);
        assert!(report.contains("Over capacity on"));
        assert!(report.contains("Over by:"));
    }

    #[test]
    fn test_report_not_permitted() {
        let constants = LoadConstants::default();
        let r = compute_utilisation(14.0, 0.0, &vehicle(false), false, &constants);
        let report = generate_utilisation_report(&r, &vehicle(false), &constants);
        assert!(report.contains("NOT PERMITTED"));
        assert!(report.contains("need upright carriage"));
    }

    #[test]
    fn test_session_report() {
        assert!(generate_session_report(&[]).contains("No calculations"));

        let constants = LoadConstants::default();
        let r = compute_utilisation(14.0, 0.0, &vehicle(true), false, &constants);
        let entry = SessionEntry::new(
            SessionInputs {
                doors: 14.0,
                pallets: 0.0,
                vehicle_id: "a-very-long-vehicle-id".to_string(),
                double_stack: false,
                fill_order: FillOrder::DoorsFirst,
                multi_drop: false,
            },
            &r,
            &PlacementResult::default(),
        );
        let report = generate_session_report(&[entry]);
        assert_eq!(report.lines().count(), 3);
        assert!(report.contains("a-very-long-.."));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("abcdefghijkl", 6), "abcd..");
    }
}
