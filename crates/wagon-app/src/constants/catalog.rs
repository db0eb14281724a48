//! Built-in vehicle catalog

use std::sync::LazyLock;

use wagon_domain::model::Vehicle;
use wagon_infra::catalog_loader::VehicleCatalog;

fn vehicle(
    id: &str,
    name: &str,
    (length_m, width_m, height_m): (f64, f64, f64),
    payload_kg: f64,
    upright_allowed: bool,
) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        name: name.to_string(),
        length_m,
        width_m,
        height_m,
        floor_area_m2: None,
        cube_m3: None,
        payload_kg,
        upright_allowed,
    }
}

/// Standard vehicles, smallest first
pub static DEFAULT_VEHICLES: LazyLock<Vec<Vehicle>> = LazyLock::new(|| {
    vec![
        vehicle("van-lwb", "LWB panel van", (4.0, 1.75, 1.9), 1200.0, false),
        vehicle("luton", "Luton box van", (4.1, 2.0, 2.3), 1000.0, true),
        vehicle("rigid-7.5t", "7.5t rigid", (6.0, 2.45, 2.4), 2500.0, true),
        vehicle("rigid-18t", "18t rigid", (7.3, 2.45, 2.6), 8000.0, true),
        vehicle("rigid-26t", "26t rigid", (9.0, 2.45, 2.6), 12000.0, true),
        vehicle("artic-13.6", "13.6m curtainsider", (13.6, 2.45, 2.7), 26000.0, true),
    ]
});

/// The built-in catalog
pub fn default_catalog() -> VehicleCatalog {
    VehicleCatalog::new(DEFAULT_VEHICLES.clone())
}

/// Get a built-in vehicle by id
pub fn get_vehicle(id: &str) -> Option<&'static Vehicle> {
    let wanted = id.trim().to_lowercase();
    DEFAULT_VEHICLES.iter().find(|v| v.id == wanted)
}
