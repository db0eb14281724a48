//! Session log entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::layout::{FillOrder, PlacementResult};
use super::utilisation::{Axis, UtilisationResult};

/// Inputs of one calculation, as entered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInputs {
    pub doors: f64,
    pub pallets: f64,
    pub vehicle_id: String,
    pub double_stack: bool,
    pub fill_order: FillOrder,
    pub multi_drop: bool,
}

/// One recorded calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub inputs: SessionInputs,
    pub stillages: u64,
    pub floor_ratio: f64,
    pub cube_ratio: f64,
    pub weight_ratio: f64,
    pub limiting: Axis,
    pub overall: f64,
    pub permitted: bool,
    pub placed: usize,
    pub overflow: u64,
}

impl SessionEntry {
    pub fn new(
        inputs: SessionInputs,
        utilisation: &UtilisationResult,
        layout: &PlacementResult,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            inputs,
            stillages: utilisation.stillages(),
            floor_ratio: utilisation.floor.ratio,
            cube_ratio: utilisation.cube.ratio,
            weight_ratio: utilisation.weight.ratio,
            limiting: utilisation.limiting,
            overall: utilisation.overall,
            permitted: utilisation.is_permitted(),
            placed: layout.placements.len(),
            overflow: layout.overflow_blocks,
        }
    }
}
