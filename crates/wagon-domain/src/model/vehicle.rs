//! Vehicle reference data and capacity

use serde::{Deserialize, Serialize};

/// A vehicle from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Short identifier used on the command line (e.g. "artic-13.6")
    pub id: String,
    /// Display name
    pub name: String,
    /// Internal bed length in metres
    pub length_m: f64,
    /// Internal bed width in metres
    pub width_m: f64,
    /// Internal height in metres
    pub height_m: f64,
    /// Precomputed floor area in m², overrides length x width
    #[serde(default)]
    pub floor_area_m2: Option<f64>,
    /// Precomputed cube in m³, overrides length x width x height
    #[serde(default)]
    pub cube_m3: Option<f64>,
    /// Maximum payload in kg
    pub payload_kg: f64,
    /// Whether upright door stillages may travel on this vehicle
    #[serde(default = "default_true")]
    pub upright_allowed: bool,
}

fn default_true() -> bool {
    true
}

impl Vehicle {
    /// Floor area in m²
    pub fn floor_area(&self) -> f64 {
        self.floor_area_m2.unwrap_or(self.length_m * self.width_m)
    }

    /// Cube capacity in m³
    pub fn cube(&self) -> f64 {
        self.cube_m3.unwrap_or(self.length_m * self.width_m * self.height_m)
    }

    /// Full capacity of the vehicle on all three axes
    pub fn capacity(&self) -> Capacity {
        Capacity {
            floor_area_m2: self.floor_area(),
            cube_m3: self.cube(),
            payload_kg: self.payload_kg,
        }
    }
}

/// Capacity along the three axes for a single calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capacity {
    pub floor_area_m2: f64,
    pub cube_m3: f64,
    pub payload_kg: f64,
}

impl Capacity {
    /// Capacity left after reserving dead space, never below zero
    pub fn usable(&self, allowance: &CapacityAllowance) -> Capacity {
        Capacity {
            floor_area_m2: (self.floor_area_m2 - allowance.floor_area_m2.max(0.0)).max(0.0),
            cube_m3: (self.cube_m3 - allowance.cube_m3.max(0.0)).max(0.0),
            payload_kg: self.payload_kg,
        }
    }
}

/// Dead space held back from the vehicle (multi-drop access gangway etc.)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityAllowance {
    #[serde(default)]
    pub floor_area_m2: f64,
    #[serde(default)]
    pub cube_m3: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_van() -> Vehicle {
        Vehicle {
            id: "box".to_string(),
            name: "Box van".to_string(),
            length_m: 4.0,
            width_m: 2.0,
            height_m: 2.0,
            floor_area_m2: None,
            cube_m3: None,
            payload_kg: 1000.0,
            upright_allowed: true,
        }
    }

    #[test]
    fn test_capacity_from_dimensions() {
        let cap = box_van().capacity();
        assert!((cap.floor_area_m2 - 8.0).abs() < f64::EPSILON);
        assert!((cap.cube_m3 - 16.0).abs() < f64::EPSILON);
        assert!((cap.payload_kg - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_precomputed_overrides_dimensions() {
        let mut v = box_van();
        v.floor_area_m2 = Some(7.5);
        v.cube_m3 = Some(14.0);
        assert!((v.floor_area() - 7.5).abs() < f64::EPSILON);
        assert!((v.cube() - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_usable_capacity_never_negative() {
        let cap = box_van().capacity();
        let usable = cap.usable(&CapacityAllowance {
            floor_area_m2: 20.0,
            cube_m3: 2.0,
        });
        assert_eq!(usable.floor_area_m2, 0.0);
        assert!((usable.cube_m3 - 14.0).abs() < f64::EPSILON);
        assert!((usable.payload_kg - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_upright_allowed_defaults_true() {
        let v: Vehicle = serde_json::from_str(
            r#"{"id":"a","name":"A","length_m":1.0,"width_m":1.0,"height_m":1.0,"payload_kg":1.0}"#,
        )
        .unwrap();
        assert!(v.upright_allowed);
    }
}
