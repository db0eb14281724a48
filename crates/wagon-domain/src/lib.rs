//! Wagon load planning domain
//!
//! Pure calculation core: utilisation against a vehicle's capacity and the
//! shelf-packed floor layout used for the load diagram.

pub mod model;
pub mod repository;
pub mod service;
