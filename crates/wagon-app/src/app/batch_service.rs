//! Batch planning from a scenario list

use wagon_infra::scenario_csv::Scenario;
use wagon_types::Result;

use super::plan_service::{LoadPlan, PlanRequest};
use super::session_service::Session;
use wagon_domain::repository::SessionLogRepository;

/// One scenario's plan, or the reason it could not be planned
#[derive(Debug)]
pub struct BatchOutcome {
    pub row: usize,
    pub scenario: Scenario,
    pub plan: std::result::Result<LoadPlan, String>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.plan.is_ok()
    }
}

/// Plan every scenario; successful plans are logged to the session.
///
/// A bad row (unknown vehicle) is reported in its outcome and does not stop
/// the batch.
pub fn run_batch<R: SessionLogRepository>(
    session: &Session<R>,
    scenarios: Vec<Scenario>,
) -> Result<Vec<BatchOutcome>> {
    let defaults = session.request().clone();
    let mut outcomes = Vec::with_capacity(scenarios.len());

    for (i, scenario) in scenarios.into_iter().enumerate() {
        let request = PlanRequest {
            doors: scenario.doors,
            pallets: scenario.pallets,
            vehicle_id: scenario.vehicle.clone().or_else(|| defaults.vehicle_id.clone()),
            double_stack: scenario.double_stack.unwrap_or(defaults.double_stack),
            ..defaults.clone()
        };

        let plan = match session.plan_and_record(&request) {
            Ok(plan) => Ok(plan),
            Err(e) => {
                log::warn!("batch row {}: {}", i + 1, e);
                Err(e.to_string())
            }
        };
        outcomes.push(BatchOutcome {
            row: i + 1,
            scenario,
            plan,
        });
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::plan_service::Planner;
    use crate::constants::default_catalog;
    use wagon_domain::model::{CapacityAllowance, LoadConstants};
    use wagon_infra::persistence::InMemorySessionLogRepository;

    fn scenario(doors: f64, pallets: f64, vehicle: Option<&str>) -> Scenario {
        Scenario {
            doors,
            pallets,
            vehicle: vehicle.map(str::to_string),
            double_stack: None,
        }
    }

    #[test]
    fn test_batch_logs_good_rows_only() {
        let planner = Planner::new(
            default_catalog(),
            LoadConstants::default(),
            CapacityAllowance::default(),
        );
        let session = Session::new(
            planner,
            PlanRequest::default(),
            InMemorySessionLogRepository::new(),
        );
        let outcomes = run_batch(
            &session,
            vec![
                scenario(14.0, 0.0, Some("luton")),
                scenario(1.0, 1.0, Some("hovercraft")),
                scenario(28.0, 2.0, None),
            ],
        )
        .unwrap();

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_ok());
        assert!(!outcomes[1].is_ok());
        assert_eq!(outcomes[1].row, 2);
        assert!(outcomes[2].is_ok());
        assert_eq!(session.entries().unwrap().len(), 2);
    }
}
