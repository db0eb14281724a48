//! Domain model types

pub mod layout;
pub mod load;
pub mod session;
pub mod utilisation;
pub mod vehicle;

pub use layout::{BlockGeometry, FillOrder, ItemKind, LayoutItem, Placement, PlacementResult};
pub use load::{LoadConstants, LoadKind, LoadLine};
pub use session::{SessionEntry, SessionInputs};
pub use utilisation::{
    Axis, AxisUsage, Incompatibility, LoadGrade, PalletEquivalents, UtilisationResult,
};
pub use vehicle::{Capacity, CapacityAllowance, Vehicle};
