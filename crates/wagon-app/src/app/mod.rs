//! Application use cases

pub mod batch_service;
pub mod plan_service;
pub mod session_service;

pub use batch_service::{run_batch, BatchOutcome};
pub use plan_service::{check_grid_width, grid_width_for, LoadPlan, PlanRequest, Planner};
pub use session_service::{InputChange, Session, SessionCommand, SESSION_HELP};
