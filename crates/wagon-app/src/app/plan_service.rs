//! Load planning use case
//!
//! Runs the utilisation calculator and the floor-layout renderer on the same
//! inputs and the same usable capacity.

use serde::Serialize;

use wagon_domain::model::layout::MAX_GRID_WIDTH_PALLETS;
use wagon_domain::model::{
    BlockGeometry, Capacity, CapacityAllowance, FillOrder, LoadConstants, PlacementResult,
    UtilisationResult, Vehicle,
};
use wagon_domain::service::{compute_utilisation_against, layout_floor};
use wagon_infra::catalog_loader::VehicleCatalog;
use wagon_types::{Error, Result};

use crate::config::Config;
use crate::repository::open_catalog;

/// Inputs for one plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub doors: f64,
    pub pallets: f64,
    /// Vehicle id; the planner's default when None
    pub vehicle_id: Option<String>,
    pub double_stack: bool,
    pub fill_order: FillOrder,
    /// Hold back the multi-drop allowance
    pub multi_drop: bool,
    /// Diagram width override in pallets
    pub grid_width_pallets: Option<u32>,
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self {
            doors: 0.0,
            pallets: 0.0,
            vehicle_id: None,
            double_stack: false,
            fill_order: FillOrder::DoorsFirst,
            multi_drop: false,
            grid_width_pallets: None,
        }
    }
}

impl PlanRequest {
    /// Request seeded from config defaults
    pub fn from_config(config: &Config) -> Self {
        Self {
            vehicle_id: config.default_vehicle.clone(),
            double_stack: config.double_stack,
            fill_order: config.fill_order,
            grid_width_pallets: config.grid_width_pallets,
            ..Self::default()
        }
    }
}

/// Result of one plan
#[derive(Debug, Clone, Serialize)]
pub struct LoadPlan {
    pub vehicle: Vehicle,
    /// Capacity the load was measured against
    pub capacity: Capacity,
    pub multi_drop: bool,
    pub fill_order: FillOrder,
    pub grid_width_pallets: u32,
    pub utilisation: UtilisationResult,
    pub layout: PlacementResult,
}

/// Holds the reference data a plan is computed from
#[derive(Debug, Clone)]
pub struct Planner {
    catalog: VehicleCatalog,
    constants: LoadConstants,
    geometry: BlockGeometry,
    multi_drop_allowance: CapacityAllowance,
    default_vehicle: Option<String>,
}

impl Planner {
    pub fn new(
        catalog: VehicleCatalog,
        constants: LoadConstants,
        multi_drop_allowance: CapacityAllowance,
    ) -> Self {
        let geometry = BlockGeometry::from_constants(&constants);
        Self {
            catalog,
            constants,
            geometry,
            multi_drop_allowance,
            default_vehicle: None,
        }
    }

    pub fn with_default_vehicle(mut self, vehicle_id: Option<String>) -> Self {
        self.default_vehicle = vehicle_id;
        self
    }

    /// Planner built from the config file and its catalog
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = open_catalog(config)?;
        let planner = Self::new(catalog, config.constants.clone(), config.multi_drop_allowance)
            .with_default_vehicle(config.default_vehicle.clone());
        planner.default_vehicle()?;
        Ok(planner)
    }

    pub fn catalog(&self) -> &VehicleCatalog {
        &self.catalog
    }

    pub fn constants(&self) -> &LoadConstants {
        &self.constants
    }

    pub fn geometry(&self) -> &BlockGeometry {
        &self.geometry
    }

    /// Configured default vehicle, else the first in the catalog
    pub fn default_vehicle(&self) -> Result<&Vehicle> {
        match self.default_vehicle {
            Some(ref id) => self.catalog.require(id),
            None => self
                .catalog
                .first()
                .ok_or_else(|| Error::InvalidInput("vehicle catalog is empty".to_string())),
        }
    }

    pub fn resolve_vehicle(&self, vehicle_id: Option<&str>) -> Result<&Vehicle> {
        match vehicle_id {
            Some(id) => self.catalog.require(id),
            None => self.default_vehicle(),
        }
    }

    /// Capacity used for a vehicle, reduced in multi-drop mode
    pub fn usable_capacity(&self, vehicle: &Vehicle, multi_drop: bool) -> Capacity {
        let full = vehicle.capacity();
        if multi_drop {
            full.usable(&self.multi_drop_allowance)
        } else {
            full
        }
    }

    /// Compute utilisation and layout for one request
    pub fn plan(&self, request: &PlanRequest) -> Result<LoadPlan> {
        if let Some(w) = request.grid_width_pallets {
            check_grid_width(w)?;
        }
        let vehicle = self.resolve_vehicle(request.vehicle_id.as_deref())?;
        let capacity = self.usable_capacity(vehicle, request.multi_drop);

        let utilisation = compute_utilisation_against(
            request.doors,
            request.pallets,
            vehicle,
            &capacity,
            request.double_stack,
            &self.constants,
        );

        let grid_width_pallets = request
            .grid_width_pallets
            .filter(|w| *w > 0)
            .unwrap_or_else(|| grid_width_for(vehicle, &self.constants));
        let capacity_pallets = utilisation.pallet_equivalents.capacity;

        let layout = layout_floor(
            capacity_pallets,
            utilisation.stillages(),
            utilisation.pallets(),
            grid_width_pallets,
            request.fill_order,
            request.double_stack,
            &self.geometry,
        );

        log::info!(
            "plan {}: {} doors, {} pallets -> {:.1}% ({}), {} overflow blocks",
            vehicle.id,
            request.doors,
            request.pallets,
            utilisation.overall * 100.0,
            utilisation.limiting,
            layout.overflow_blocks
        );

        Ok(LoadPlan {
            vehicle: vehicle.clone(),
            capacity,
            multi_drop: request.multi_drop,
            fill_order: request.fill_order,
            grid_width_pallets,
            utilisation,
            layout,
        })
    }
}

/// Whole pallet widths that fit across the bed, within the drawable range
pub fn grid_width_for(vehicle: &Vehicle, constants: &LoadConstants) -> u32 {
    if constants.pallet_width_m <= 0.0 || !vehicle.width_m.is_finite() {
        return 1;
    }
    let across = (vehicle.width_m / constants.pallet_width_m).floor();
    across.clamp(1.0, f64::from(MAX_GRID_WIDTH_PALLETS)) as u32
}

/// Reject a diagram width that cannot be drawn
pub fn check_grid_width(width_pallets: u32) -> Result<()> {
    if width_pallets > MAX_GRID_WIDTH_PALLETS {
        return Err(Error::InvalidInput(format!(
            "grid width {} is too wide, at most {} pallets",
            width_pallets, MAX_GRID_WIDTH_PALLETS
        )));
    }
    Ok(())
}
