//! End-to-end load scenarios
//!
//! Drives the planner, session and export the way the CLI commands do.
//!
//! Run: cargo test -p wagon-cli --test scenario_test

use std::io::Write;

use tempfile::{tempdir, NamedTempFile};
use wagon_app::app::{run_batch, PlanRequest, Planner, Session};
use wagon_app::config::Config;
use wagon_app::constants::default_catalog;
use wagon_app::export::export_session;
use wagon_app::repository::{open_catalog, open_session_log};
use wagon_domain::model::{
    Axis, BlockGeometry, CapacityAllowance, FillOrder, LoadConstants, LoadKind,
};
use wagon_domain::service::layout_floor;
use wagon_infra::catalog_loader::VehicleCatalog;
use wagon_infra::scenario_csv::load_scenarios_from_csv;

const EPS: f64 = 1e-9;

fn planner() -> Planner {
    Planner::new(
        default_catalog(),
        LoadConstants::default(),
        CapacityAllowance::default(),
    )
}

fn request(doors: f64, pallets: f64, vehicle: &str) -> PlanRequest {
    PlanRequest {
        doors,
        pallets,
        vehicle_id: Some(vehicle.to_string()),
        ..PlanRequest::default()
    }
}

#[test]
fn full_stillage_uses_one_footprint() {
    let plan = planner().plan(&request(14.0, 0.0, "artic-13.6")).unwrap();

    assert_eq!(plan.utilisation.stillages(), 1);
    assert!((plan.utilisation.floor.used - 2.7).abs() < EPS);
    assert_eq!(plan.layout.placements.len(), 1);
    assert_eq!(plan.layout.placements[0].item.label, "S1");
    assert!(plan.layout.overflow.is_empty());
}

#[test]
fn one_extra_door_needs_a_second_stillage() {
    let plan = planner().plan(&request(15.0, 0.0, "artic-13.6")).unwrap();
    assert_eq!(plan.utilisation.stillages(), 2);
    assert_eq!(plan.layout.placements.len(), 2);
}

#[test]
fn double_stacking_halves_floor_but_not_weight() {
    let flat = planner().plan(&request(0.0, 5.0, "artic-13.6")).unwrap();
    let stacked = planner()
        .plan(&PlanRequest {
            double_stack: true,
            ..request(0.0, 5.0, "artic-13.6")
        })
        .unwrap();

    let line = stacked
        .utilisation
        .lines
        .iter()
        .find(|l| l.kind == LoadKind::Pallet)
        .unwrap();
    assert_eq!(line.units, 5.0);
    assert_eq!(line.floor_units, 3.0);

    assert!((stacked.utilisation.weight.used - 2250.0).abs() < EPS);
    assert!((stacked.utilisation.weight.used - flat.utilisation.weight.used).abs() < EPS);
    assert!((stacked.utilisation.cube.used - flat.utilisation.cube.used).abs() < EPS);
    assert!(stacked.utilisation.floor.used < flat.utilisation.floor.used);
    assert_eq!(stacked.layout.placements.len(), 3);
}

#[test]
fn part_pallet_weighs_as_entered() {
    let plan = planner().plan(&request(0.0, 2.5, "artic-13.6")).unwrap();
    let u = &plan.utilisation;

    assert!((u.weight.used - 1125.0).abs() < EPS);
    assert!((u.floor.used - 2.5 * 1.2).abs() < EPS);
    assert_eq!(u.pallets(), 3);
    assert_eq!(plan.layout.placements.len(), 3);
}

#[test]
fn absurd_door_count_is_reported_not_drawn() {
    let plan = planner().plan(&request(1e30, 0.0, "artic-13.6")).unwrap();
    let layout = &plan.layout;

    assert!(plan.utilisation.is_over_capacity());
    assert!(layout.placed_cells <= layout.capacity_cells);
    assert!(!layout.all_placed());
    assert!(layout.overflow.len() < 1_000);
    assert!(layout.overflow_blocks > 1_000_000);
}

#[test]
fn heavy_load_is_weight_limited() {
    let catalog = VehicleCatalog::load_from_str(
        r#"
[[vehicles]]
id = "light-box"
name = "Light payload box"
length_m = 10.0
width_m = 2.4
height_m = 3.0
payload_kg = 1000.0
"#,
    )
    .unwrap();
    let constants = LoadConstants {
        pallet_weight_kg: 600.0,
        ..LoadConstants::default()
    };
    let planner = Planner::new(catalog, constants, CapacityAllowance::default());

    let plan = planner.plan(&request(0.0, 2.0, "light-box")).unwrap();
    let u = &plan.utilisation;
    assert!((u.weight.ratio - 1.2).abs() < EPS);
    assert_eq!(u.limiting, Axis::Weight);
    assert!((u.overall - 1.2).abs() < EPS);
    assert!(u.is_over_capacity());
    assert!(u.is_permitted());
}

#[test]
fn second_pallet_overflows_one_pallet_capacity() {
    let layout = layout_floor(
        1.0,
        0,
        2,
        2,
        FillOrder::DoorsFirst,
        false,
        &BlockGeometry::default(),
    );

    assert_eq!(layout.placements.len(), 1);
    assert_eq!(layout.placements[0].item.label, "P1");
    assert_eq!(layout.overflow.len(), 1);
    assert_eq!(layout.overflow[0].label, "P2");
}

#[test]
fn upright_stillages_on_panel_van_are_flagged_not_refused() {
    let plan = planner().plan(&request(14.0, 1.0, "van-lwb")).unwrap();
    let u = &plan.utilisation;

    assert!(!u.is_permitted());
    assert_eq!(u.incompatibilities.len(), 1);
    assert_eq!(u.incompatibilities[0].kind, LoadKind::Stillage);
    assert!(u.overall > 0.0);
}

#[test]
fn session_logs_and_exports_every_change() {
    let mut session = Session::new(
        planner(),
        request(0.0, 0.0, "rigid-18t"),
        open_session_log(),
    );
    session
        .apply(wagon_app::app::InputChange::Doors(20.0))
        .unwrap();
    session
        .apply(wagon_app::app::InputChange::Pallets(3.0))
        .unwrap();
    session
        .apply(wagon_app::app::InputChange::DoubleStack(true))
        .unwrap();

    let entries = session.entries().unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries[2].inputs.double_stack);

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("log.csv");
    export_session(&entries, &csv_path).unwrap();
    let text = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(text.lines().count(), 4);

    let xlsx_path = dir.path().join("log.xlsx");
    export_session(&entries, &xlsx_path).unwrap();
    assert!(xlsx_path.exists());
}

#[test]
fn batch_from_csv_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "doors,pallets,vehicle,double_stack").unwrap();
    writeln!(file, "14,0,luton,").unwrap();
    writeln!(file, "28,6,rigid-26t,yes").unwrap();
    writeln!(file, "5,5,submarine,no").unwrap();
    file.flush().unwrap();

    let scenarios = load_scenarios_from_csv(file.path()).unwrap();
    assert_eq!(scenarios.len(), 3);

    let session = Session::new(planner(), PlanRequest::default(), open_session_log());
    let outcomes = run_batch(&session, scenarios).unwrap();

    assert!(outcomes[0].is_ok());
    let second = outcomes[1].plan.as_ref().unwrap();
    assert!(second.utilisation.double_stack);
    assert_eq!(second.utilisation.stillages(), 2);
    assert!(!outcomes[2].is_ok());
    assert_eq!(session.entries().unwrap().len(), 2);
}

#[test]
fn config_round_trip_drives_planner() {
    let dir = tempdir().unwrap();
    let catalog_path = dir.path().join("fleet.toml");
    std::fs::write(
        &catalog_path,
        r#"
[[vehicles]]
id = "yard-shunter"
name = "Yard shunter"
length_m = 5.0
width_m = 2.4
height_m = 2.5
payload_kg = 3000.0

[[vehicles]]
id = "flatbed"
name = "Flatbed"
length_m = 8.0
width_m = 2.5
height_m = 2.8
payload_kg = 9000.0
upright_allowed = false
"#,
    )
    .unwrap();

    let config = Config {
        default_vehicle: Some("flatbed".to_string()),
        catalog_path: Some(catalog_path),
        double_stack: true,
        ..Config::default()
    };
    let config_path = dir.path().join("config.json");
    config.save_to(&config_path).unwrap();
    let loaded = Config::load_from(&config_path).unwrap();
    assert_eq!(loaded, config);

    let catalog = open_catalog(&loaded).unwrap();
    assert_eq!(catalog.first().unwrap().id, "yard-shunter");

    let planner = Planner::from_config(&loaded).unwrap();
    let request = PlanRequest {
        pallets: 4.0,
        ..PlanRequest::from_config(&loaded)
    };
    let plan = planner.plan(&request).unwrap();
    assert_eq!(plan.vehicle.id, "flatbed");
    assert_eq!(plan.layout.placements.len(), 2);
}
