//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wagon_domain::model::FillOrder;
use wagon_types::OutputFormat;

#[derive(Parser)]
#[command(name = "wagon-calc")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Vehicle utilisation and floor layout for door stillages and pallets")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Vehicle catalog TOML (overrides config)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan one load
    Plan {
        /// Number of doors
        #[arg(long, short = 'd', default_value_t = 0.0, allow_negative_numbers = true)]
        doors: f64,

        /// Number of pallets
        #[arg(long, short = 'p', default_value_t = 0.0, allow_negative_numbers = true)]
        pallets: f64,

        /// Vehicle id. Uses config default if not specified.
        #[arg(long)]
        vehicle: Option<String>,

        /// Double-stack pallets (optionally `--double-stack false`)
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        double_stack: Option<bool>,

        /// Which load goes on the floor first (doors-first, pallets-first)
        #[arg(long)]
        fill_order: Option<FillOrder>,

        /// Hold back the multi-drop allowance
        #[arg(long)]
        multi_drop: bool,

        /// Diagram width in pallets (1 to 16)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=16))]
        grid_width: Option<u32>,

        /// Skip the floor diagram
        #[arg(long)]
        no_diagram: bool,
    },

    /// List the vehicle catalog
    Vehicles,

    /// Interactive session; every change is recalculated and logged
    Session,

    /// Plan every scenario in a CSV file
    Batch {
        /// CSV with doors,pallets[,vehicle][,double_stack]
        csv: PathBuf,

        /// Export the results (.csv or .xlsx)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default vehicle id ("" to clear)
        #[arg(long)]
        set_vehicle: Option<String>,

        /// Set default fill order
        #[arg(long)]
        set_fill_order: Option<FillOrder>,

        /// Enable/disable double-stacking by default
        #[arg(long)]
        set_double_stack: Option<bool>,

        /// Set diagram width in pallets, up to 16 (0 derives it from the vehicle)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=16))]
        set_grid_width: Option<u32>,

        /// Set the multi-drop floor allowance in m²
        #[arg(long)]
        set_multi_drop_floor: Option<f64>,

        /// Set the vehicle catalog TOML ("" for the built-in list)
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
