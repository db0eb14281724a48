//! Output formatting module

use serde_json::json;
use wagon_app::app::{BatchOutcome, LoadPlan};
use wagon_domain::model::{LoadConstants, SessionEntry, Vehicle};
use wagon_domain::service::{
    generate_session_report, generate_utilisation_report, render_layout_diagram,
};
use wagon_types::{OutputFormat, Result};

pub fn output_plan(
    output_format: OutputFormat,
    plan: &LoadPlan,
    constants: &LoadConstants,
    show_diagram: bool,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(plan)?;
        println!("{}", content);
    } else {
        print!(
            "{}",
            generate_utilisation_report(&plan.utilisation, &plan.vehicle, constants)
        );
        if plan.multi_drop {
            println!(
                "Multi-drop: measured against {:.2} m² / {:.2} m³",
                plan.capacity.floor_area_m2, plan.capacity.cube_m3
            );
        }
        if show_diagram {
            println!(
                "\nFloor layout ({} pallets wide, {}):",
                plan.grid_width_pallets, plan.fill_order
            );
            print!("{}", render_layout_diagram(&plan.layout));
        }
    }

    Ok(())
}

/// One-line summary used after each session change
pub fn plan_summary(plan: &LoadPlan) -> String {
    let u = &plan.utilisation;
    let mut line = format!(
        "{}: {} stillages, {} pallets | floor {:.1}%  cube {:.1}%  weight {:.1}% | {} {:.1}%",
        plan.vehicle.id,
        u.stillages(),
        u.pallets(),
        u.floor.percent(),
        u.cube.percent(),
        u.weight.percent(),
        u.limiting,
        u.overall * 100.0
    );
    if !u.is_permitted() {
        line.push_str(" | NOT PERMITTED");
    }
    if !plan.layout.all_placed() {
        line.push_str(&format!(" | overflow {}", plan.layout.overflow_blocks));
    }
    line
}

pub fn output_vehicles(output_format: OutputFormat, vehicles: &[Vehicle]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(vehicles)?);
        return Ok(());
    }

    println!(
        "{:<12} {:<22} {:>16} {:>8} {:>8} {:>9} {:>8}",
        "ID", "Name", "L x W x H (m)", "Floor", "Cube", "Payload", "Upright"
    );
    println!("{}", "-".repeat(88));
    for v in vehicles {
        println!(
            "{:<12} {:<22} {:>16} {:>8.2} {:>8.2} {:>9.0} {:>8}",
            v.id,
            v.name,
            format!("{} x {} x {}", v.length_m, v.width_m, v.height_m),
            v.floor_area(),
            v.cube(),
            v.payload_kg,
            if v.upright_allowed { "yes" } else { "no" }
        );
    }
    Ok(())
}

pub fn output_session_log(output_format: OutputFormat, entries: &[SessionEntry]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(entries)?);
    } else {
        print!("{}", generate_session_report(entries));
    }
    Ok(())
}

pub fn output_batch(output_format: OutputFormat, outcomes: &[BatchOutcome]) -> Result<()> {
    if output_format == OutputFormat::Json {
        let rows: Vec<_> = outcomes
            .iter()
            .map(|o| match o.plan {
                Ok(ref plan) => json!({ "row": o.row, "plan": plan }),
                Err(ref e) => json!({ "row": o.row, "error": e }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for o in outcomes {
        match o.plan {
            Ok(ref plan) => println!("{:>4}  {}", o.row, plan_summary(plan)),
            Err(ref e) => println!("{:>4}  error: {}", o.row, e),
        }
    }
    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    println!(
        "\n{} scenarios, {} planned, {} failed",
        outcomes.len(),
        outcomes.len() - failed,
        failed
    );
    Ok(())
}
