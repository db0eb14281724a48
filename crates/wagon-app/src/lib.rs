//! Application service layer - config, catalog, planning, session, export

pub mod app;
pub mod config;
pub mod constants;
pub mod export;
pub mod repository;
