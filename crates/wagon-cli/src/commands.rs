//! Command handlers

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Commands};
use crate::output::{
    output_batch, output_plan, output_session_log, output_vehicles, plan_summary,
};
use wagon_app::app::{
    check_grid_width, run_batch, PlanRequest, Planner, Session, SessionCommand, SESSION_HELP,
};
use wagon_app::config::Config;
use wagon_app::export::export_session;
use wagon_app::repository::{open_catalog, open_session_log};
use wagon_domain::model::FillOrder;
use wagon_domain::repository::SessionLogRepository;
use wagon_domain::service::{generate_utilisation_report, render_layout_diagram};
use wagon_infra::scenario_csv::load_scenarios_from_csv;
use wagon_types::{Error, OutputFormat, Result};

pub fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref catalog) = cli.catalog {
        config.catalog_path = Some(catalog.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Plan {
            doors,
            pallets,
            vehicle,
            double_stack,
            fill_order,
            multi_drop,
            grid_width,
            no_diagram,
        } => {
            let defaults = PlanRequest::from_config(&config);
            let request = PlanRequest {
                doors,
                pallets,
                vehicle_id: vehicle.or(defaults.vehicle_id),
                double_stack: double_stack.unwrap_or(defaults.double_stack),
                fill_order: fill_order.unwrap_or(defaults.fill_order),
                multi_drop,
                grid_width_pallets: grid_width.or(defaults.grid_width_pallets),
            };
            cmd_plan(&config, output_format, &request, !no_diagram)
        }
        Commands::Vehicles => cmd_vehicles(&config, output_format),
        Commands::Session => cmd_session(&config, output_format),
        Commands::Batch { csv, output } => cmd_batch(&config, output_format, &csv, output),
        Commands::Config {
            show,
            set_output,
            set_vehicle,
            set_fill_order,
            set_double_stack,
            set_grid_width,
            set_multi_drop_floor,
            set_catalog,
            reset,
        } => cmd_config(
            show,
            set_output,
            set_vehicle,
            set_fill_order,
            set_double_stack,
            set_grid_width,
            set_multi_drop_floor,
            set_catalog,
            reset,
        ),
    }
}

fn cmd_plan(
    config: &Config,
    output_format: OutputFormat,
    request: &PlanRequest,
    show_diagram: bool,
) -> Result<()> {
    let planner = Planner::from_config(config)?;
    let plan = planner.plan(request)?;
    output_plan(output_format, &plan, planner.constants(), show_diagram)
}

fn cmd_vehicles(config: &Config, output_format: OutputFormat) -> Result<()> {
    let catalog = open_catalog(config)?;
    output_vehicles(output_format, catalog.all())
}

fn cmd_session(config: &Config, output_format: OutputFormat) -> Result<()> {
    let planner = Planner::from_config(config)?;
    let mut session = Session::new(planner, PlanRequest::from_config(config), open_session_log());

    println!("Wagon Calc session. Type 'help' for commands.");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("Error: {}", e);
                continue;
            }
        };

        if let SessionCommand::Quit = command {
            break;
        }
        if let Err(e) = run_session_command(&mut session, command, output_format) {
            eprintln!("Error: {}", e);
        }
    }

    let count = session.log().count()?;
    println!("{} calculations this session", count);
    Ok(())
}

fn run_session_command<R: SessionLogRepository>(
    session: &mut Session<R>,
    command: SessionCommand,
    output_format: OutputFormat,
) -> Result<()> {
    match command {
        SessionCommand::Set(change) => {
            let plan = session.apply(change)?;
            println!("{}", plan_summary(&plan));
        }
        SessionCommand::Show => {
            let plan = session.current()?;
            if output_format == OutputFormat::Json {
                output_plan(output_format, &plan, session.planner().constants(), true)?;
            } else {
                print!(
                    "{}",
                    generate_utilisation_report(
                        &plan.utilisation,
                        &plan.vehicle,
                        session.planner().constants()
                    )
                );
                print!("{}", render_layout_diagram(&plan.layout));
            }
        }
        SessionCommand::Log => output_session_log(output_format, &session.entries()?)?,
        SessionCommand::Export(path) => {
            let entries = session.entries()?;
            export_session(&entries, &path)?;
            println!("Exported {} entries to {}", entries.len(), path.display());
        }
        SessionCommand::Clear => {
            session.clear_log()?;
            println!("Session log cleared, starting a new log");
        }
        SessionCommand::Vehicles => {
            output_vehicles(output_format, session.planner().catalog().all())?
        }
        SessionCommand::Help => println!("{}", SESSION_HELP),
        SessionCommand::Quit => {}
    }
    Ok(())
}

fn cmd_batch(
    config: &Config,
    output_format: OutputFormat,
    csv: &Path,
    output: Option<PathBuf>,
) -> Result<()> {
    let scenarios = load_scenarios_from_csv(csv)?;
    if scenarios.is_empty() {
        return Err(Error::InvalidInput(format!(
            "no scenarios in {}",
            csv.display()
        )));
    }

    let planner = Planner::from_config(config)?;
    let session = Session::new(planner, PlanRequest::from_config(config), open_session_log());
    let outcomes = run_batch(&session, scenarios)?;
    output_batch(output_format, &outcomes)?;

    if let Some(path) = output {
        let entries = session.entries()?;
        export_session(&entries, &path)?;
        eprintln!("Exported {} entries to {}", entries.len(), path.display());
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    show: bool,
    set_output: Option<OutputFormat>,
    set_vehicle: Option<String>,
    set_fill_order: Option<FillOrder>,
    set_double_stack: Option<bool>,
    set_grid_width: Option<u32>,
    set_multi_drop_floor: Option<f64>,
    set_catalog: Option<PathBuf>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(path) = set_catalog {
        config.catalog_path = Some(path).filter(|p| !p.as_os_str().is_empty());
        // fail before saving a catalog that does not load
        open_catalog(&config)?;
        modified = true;
    }

    if let Some(vehicle) = set_vehicle {
        let vehicle = vehicle.trim().to_string();
        if vehicle.is_empty() {
            config.default_vehicle = None;
        } else {
            let id = open_catalog(&config)?.require(&vehicle)?.id.clone();
            config.default_vehicle = Some(id);
        }
        modified = true;
    }

    if let Some(fill_order) = set_fill_order {
        config.fill_order = fill_order;
        modified = true;
    }

    if let Some(double_stack) = set_double_stack {
        config.double_stack = double_stack;
        modified = true;
    }

    if let Some(width) = set_grid_width {
        check_grid_width(width)?;
        config.grid_width_pallets = Some(width).filter(|w| *w > 0);
        modified = true;
    }

    if let Some(floor) = set_multi_drop_floor {
        if !floor.is_finite() || floor < 0.0 {
            return Err(Error::InvalidInput(format!(
                "multi-drop floor allowance must be 0 or more, got {}",
                floor
            )));
        }
        config.multi_drop_allowance.floor_area_m2 = floor;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
