//! Domain services

pub mod diagram;
pub mod layout;
pub mod report;
pub mod utilisation;

pub use diagram::{fill_bar, gauge, render_layout_diagram};
pub use layout::layout_floor;
pub use report::{generate_session_report, generate_utilisation_report};
pub use utilisation::{compute_utilisation, compute_utilisation_against, stillages_required};
