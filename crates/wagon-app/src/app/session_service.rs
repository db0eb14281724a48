//! Interactive session use case
//!
//! Every input change recomputes the plan and appends one entry to the
//! session log.

use std::path::PathBuf;

use wagon_domain::model::{FillOrder, SessionEntry, SessionInputs};
use wagon_domain::repository::SessionLogRepository;
use wagon_infra::scenario_csv::parse_flag;
use wagon_types::{Error, Result};

use super::plan_service::{check_grid_width, LoadPlan, PlanRequest, Planner};

/// A change to one input
#[derive(Debug, Clone, PartialEq)]
pub enum InputChange {
    Doors(f64),
    Pallets(f64),
    Vehicle(String),
    DoubleStack(bool),
    FillOrder(FillOrder),
    MultiDrop(bool),
    /// None derives the width from the vehicle
    GridWidth(Option<u32>),
}

/// One parsed session line
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Set(InputChange),
    Show,
    Log,
    Export(PathBuf),
    Clear,
    Vehicles,
    Help,
    Quit,
}

pub const SESSION_HELP: &str = "\
Commands:
  doors N              set door quantity
  pallets N            set pallet quantity
  vehicle ID           choose a vehicle
  stack on|off         double-stack pallets
  order doors|pallets  fill order for the diagram
  multidrop on|off     hold back multi-drop dead space
  width N|auto         diagram width in pallets
  show                 show the current plan
  log                  show the session log
  export PATH          export the log (.csv or .xlsx)
  clear                start a new, empty session log
  vehicles             list vehicles
  help                 this text
  quit                 leave the session";

/// Quantity from free text; anything unparseable counts as zero
pub fn parse_quantity(s: &str) -> f64 {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        Ok(_) => 0.0,
        Err(_) => {
            log::warn!("'{}' is not a number, using 0", s.trim());
            0.0
        }
    }
}

impl SessionCommand {
    /// Parse one input line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((w, a)) => (w, a.trim()),
            None => (line, ""),
        };
        let need_arg = |name: &str| -> Result<()> {
            if arg.is_empty() {
                Err(Error::InvalidInput(format!("'{}' needs a value", name)))
            } else {
                Ok(())
            }
        };
        let flag = |name: &str| -> Result<bool> {
            parse_flag(arg).ok_or_else(|| {
                Error::InvalidInput(format!("'{}' expects on or off, got '{}'", name, arg))
            })
        };

        let command = match word.to_lowercase().as_str() {
            "doors" | "d" => {
                need_arg("doors")?;
                SessionCommand::Set(InputChange::Doors(parse_quantity(arg)))
            }
            "pallets" | "p" => {
                need_arg("pallets")?;
                SessionCommand::Set(InputChange::Pallets(parse_quantity(arg)))
            }
            "vehicle" | "v" => {
                need_arg("vehicle")?;
                SessionCommand::Set(InputChange::Vehicle(arg.to_string()))
            }
            "stack" => SessionCommand::Set(InputChange::DoubleStack(flag("stack")?)),
            "multidrop" => SessionCommand::Set(InputChange::MultiDrop(flag("multidrop")?)),
            "order" => {
                let order = arg.parse::<FillOrder>().map_err(Error::InvalidInput)?;
                SessionCommand::Set(InputChange::FillOrder(order))
            }
            "width" => {
                need_arg("width")?;
                let width = if arg.eq_ignore_ascii_case("auto") {
                    None
                } else {
                    let w = arg.parse::<u32>().map_err(|_| {
                        Error::InvalidInput(format!("bad width '{}'", arg))
                    })?;
                    check_grid_width(w)?;
                    Some(w).filter(|w| *w > 0)
                };
                SessionCommand::Set(InputChange::GridWidth(width))
            }
            "show" => SessionCommand::Show,
            "log" | "history" => SessionCommand::Log,
            "export" => {
                need_arg("export")?;
                SessionCommand::Export(PathBuf::from(arg))
            }
            "clear" => SessionCommand::Clear,
            "vehicles" => SessionCommand::Vehicles,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            other => {
                return Err(Error::InvalidInput(format!(
                    "unknown command '{}', try 'help'",
                    other
                )))
            }
        };
        Ok(Some(command))
    }
}

/// Current inputs plus the log of every calculation made
pub struct Session<R: SessionLogRepository> {
    planner: Planner,
    request: PlanRequest,
    log: R,
}

impl<R: SessionLogRepository> Session<R> {
    pub fn new(planner: Planner, request: PlanRequest, log: R) -> Self {
        Self {
            planner,
            request,
            log,
        }
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    pub fn request(&self) -> &PlanRequest {
        &self.request
    }

    pub fn log(&self) -> &R {
        &self.log
    }

    /// Plan for the current inputs without logging
    pub fn current(&self) -> Result<LoadPlan> {
        self.planner.plan(&self.request)
    }

    /// Apply a change, recompute and log. The inputs are left untouched if
    /// the change cannot be planned (e.g. unknown vehicle).
    pub fn apply(&mut self, change: InputChange) -> Result<LoadPlan> {
        let mut next = self.request.clone();
        match change {
            InputChange::Doors(v) => next.doors = v,
            InputChange::Pallets(v) => next.pallets = v,
            InputChange::Vehicle(id) => next.vehicle_id = Some(id),
            InputChange::DoubleStack(on) => next.double_stack = on,
            InputChange::FillOrder(order) => next.fill_order = order,
            InputChange::MultiDrop(on) => next.multi_drop = on,
            InputChange::GridWidth(w) => next.grid_width_pallets = w,
        }

        let plan = self.plan_and_record(&next)?;
        self.request = next;
        Ok(plan)
    }

    /// Plan an arbitrary request and append it to the session log
    pub fn plan_and_record(&self, request: &PlanRequest) -> Result<LoadPlan> {
        let plan = self.planner.plan(request)?;
        let inputs = SessionInputs {
            doors: request.doors,
            pallets: request.pallets,
            vehicle_id: plan.vehicle.id.clone(),
            double_stack: request.double_stack,
            fill_order: plan.fill_order,
            multi_drop: plan.multi_drop,
        };
        self.log
            .append(SessionEntry::new(inputs, &plan.utilisation, &plan.layout))?;
        Ok(plan)
    }

    pub fn entries(&self) -> Result<Vec<SessionEntry>> {
        self.log.find_all()
    }

    pub fn clear_log(&self) -> Result<()> {
        self.log.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::default_catalog;
    use wagon_domain::model::{CapacityAllowance, LoadConstants};
    use wagon_infra::persistence::InMemorySessionLogRepository;

    fn session() -> Session<InMemorySessionLogRepository> {
        let planner = Planner::new(
            default_catalog(),
            LoadConstants::default(),
            CapacityAllowance::default(),
        );
        Session::new(planner, PlanRequest::default(), InMemorySessionLogRepository::new())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            SessionCommand::parse("doors 15").unwrap(),
            Some(SessionCommand::Set(InputChange::Doors(15.0)))
        );
        assert_eq!(
            SessionCommand::parse("  stack on ").unwrap(),
            Some(SessionCommand::Set(InputChange::DoubleStack(true)))
        );
        assert_eq!(
            SessionCommand::parse("order pallets").unwrap(),
            Some(SessionCommand::Set(InputChange::FillOrder(FillOrder::PalletsFirst)))
        );
        assert_eq!(
            SessionCommand::parse("width auto").unwrap(),
            Some(SessionCommand::Set(InputChange::GridWidth(None)))
        );
        assert_eq!(
            SessionCommand::parse("export out.csv").unwrap(),
            Some(SessionCommand::Export(PathBuf::from("out.csv")))
        );
        assert_eq!(SessionCommand::parse("").unwrap(), None);
        assert_eq!(SessionCommand::parse("# note").unwrap(), None);
        assert_eq!(SessionCommand::parse("quit").unwrap(), Some(SessionCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(SessionCommand::parse("fly away").is_err());
        assert!(SessionCommand::parse("stack maybe").is_err());
        assert!(SessionCommand::parse("doors").is_err());
        assert!(SessionCommand::parse("width wide").is_err());
        assert!(SessionCommand::parse("width 4000000000").is_err());
        assert!(SessionCommand::parse("width 17").is_err());
        assert_eq!(
            SessionCommand::parse("width 16").unwrap(),
            Some(SessionCommand::Set(InputChange::GridWidth(Some(16))))
        );
    }

    #[test]
    fn test_bad_quantities_become_zero() {
        assert_eq!(parse_quantity("abc"), 0.0);
        assert_eq!(parse_quantity("-4"), 0.0);
        assert_eq!(parse_quantity("inf"), 0.0);
        assert_eq!(parse_quantity("2.5"), 2.5);
    }

    #[test]
    fn test_each_change_logs_one_entry() {
        let mut s = session();
        s.apply(InputChange::Vehicle("artic-13.6".to_string())).unwrap();
        s.apply(InputChange::Doors(15.0)).unwrap();
        let plan = s.apply(InputChange::Pallets(5.0)).unwrap();
        assert_eq!(plan.utilisation.stillages(), 2);

        let entries = s.entries().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].inputs.doors, 15.0);
        assert_eq!(entries[2].inputs.pallets, 5.0);
        assert_eq!(entries[2].inputs.vehicle_id, "artic-13.6");
    }

    #[test]
    fn test_unknown_vehicle_leaves_state() {
        let mut s = session();
        s.apply(InputChange::Doors(14.0)).unwrap();
        assert!(s.apply(InputChange::Vehicle("zeppelin".to_string())).is_err());
        assert_eq!(s.request().vehicle_id, None);
        assert_eq!(s.entries().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_log() {
        let mut s = session();
        s.apply(InputChange::Doors(1.0)).unwrap();
        s.clear_log().unwrap();
        assert!(s.entries().unwrap().is_empty());
        assert_eq!(s.request().doors, 1.0);

        // a cleared log starts afresh
        s.apply(InputChange::Pallets(2.0)).unwrap();
        assert_eq!(s.entries().unwrap().len(), 1);
    }

    #[test]
    fn test_too_wide_grid_is_refused() {
        let mut s = session();
        assert!(s.apply(InputChange::GridWidth(Some(u32::MAX))).is_err());
        assert_eq!(s.request().grid_width_pallets, None);
        assert!(s.entries().unwrap().is_empty());
    }
}
