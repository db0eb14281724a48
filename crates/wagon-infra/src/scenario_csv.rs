//! CSV loaders and writers
//!
//! Batch scenarios come in as `doors,pallets[,vehicle][,double_stack]` with a
//! header row. The session log goes out one row per calculation.

use serde::Deserialize;
use std::io::{Read, Write};
use std::path::Path;

use wagon_domain::model::SessionEntry;
use wagon_types::{Error, Result};

/// One batch input row
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub doors: f64,
    pub pallets: f64,
    pub vehicle: Option<String>,
    pub double_stack: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ScenarioRecord {
    #[serde(default)]
    doors: Option<f64>,
    #[serde(default)]
    pallets: Option<f64>,
    #[serde(default)]
    vehicle: Option<String>,
    #[serde(default)]
    double_stack: Option<String>,
}

/// Load scenarios from a CSV file
pub fn load_scenarios_from_csv(path: &Path) -> Result<Vec<Scenario>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let file = std::fs::File::open(path)?;
    read_scenarios(file)
}

/// Read scenarios from any CSV source
pub fn read_scenarios<R: Read>(reader: R) -> Result<Vec<Scenario>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut scenarios = Vec::new();
    for (i, record) in rdr.deserialize::<ScenarioRecord>().enumerate() {
        let record = record?;
        let double_stack = match record.double_stack.as_deref() {
            None | Some("") => None,
            Some(s) => Some(parse_flag(s).ok_or_else(|| {
                Error::InvalidInput(format!("row {}: bad double_stack value '{}'", i + 1, s))
            })?),
        };
        scenarios.push(Scenario {
            doors: record.doors.unwrap_or(0.0),
            pallets: record.pallets.unwrap_or(0.0),
            vehicle: record.vehicle.filter(|v| !v.is_empty()),
            double_stack,
        });
    }
    Ok(scenarios)
}

/// Parse yes/no style flags
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Column order of the session CSV and the Details sheet
pub const SESSION_HEADERS: [&str; 16] = [
    "id",
    "timestamp",
    "vehicle",
    "doors",
    "pallets",
    "double_stack",
    "fill_order",
    "multi_drop",
    "stillages",
    "floor_pct",
    "cube_pct",
    "weight_pct",
    "limiting",
    "overall_pct",
    "permitted",
    "overflow_blocks",
];

/// Write the session log to a CSV file
pub fn write_session_csv(entries: &[SessionEntry], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_session(entries, file)?;
    log::info!("exported {} session entries to {}", entries.len(), path.display());
    Ok(())
}

/// Write the session log as CSV to any sink
pub fn write_session<W: Write>(entries: &[SessionEntry], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SESSION_HEADERS)?;
    for e in entries {
        wtr.write_record([
            e.id.clone(),
            e.timestamp.to_rfc3339(),
            e.inputs.vehicle_id.clone(),
            e.inputs.doors.to_string(),
            e.inputs.pallets.to_string(),
            e.inputs.double_stack.to_string(),
            e.inputs.fill_order.to_string(),
            e.inputs.multi_drop.to_string(),
            e.stillages.to_string(),
            format!("{:.1}", e.floor_ratio * 100.0),
            format!("{:.1}", e.cube_ratio * 100.0),
            format!("{:.1}", e.weight_ratio * 100.0),
            e.limiting.label().to_string(),
            format!("{:.1}", e.overall * 100.0),
            e.permitted.to_string(),
            e.overflow.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
