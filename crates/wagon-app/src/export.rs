//! Session log export

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use wagon_domain::model::{LoadGrade, SessionEntry};
use wagon_infra::scenario_csv::{write_session_csv, SESSION_HEADERS};
use wagon_types::{Error, Result};

/// Export the session log; the format follows the file extension
pub fn export_session(entries: &[SessionEntry], path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("csv") => write_session_csv(entries, path),
        Some("xlsx") => export_to_excel(entries, path),
        _ => Err(Error::InvalidInput(format!(
            "cannot export to '{}': use a .csv or .xlsx file",
            path.display()
        ))),
    }
}

/// Export the session log to an Excel workbook
pub fn export_to_excel(entries: &[SessionEntry], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, entries)?;

    let details_sheet = workbook.add_worksheet();
    write_details_sheet(details_sheet, entries)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    log::info!(
        "exported {} session entries to {}",
        entries.len(),
        output_path.display()
    );
    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, entries: &[SessionEntry]) -> Result<()> {
    sheet
        .set_name("Summary")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();

    sheet
        .write_string_with_format(0, 0, "Wagon Load Session", &header_format)
        .map_err(|e| Error::Excel(e.to_string()))?;

    let not_permitted = entries.iter().filter(|e| !e.permitted).count();
    let with_overflow = entries.iter().filter(|e| e.overflow > 0).count();
    let rows = [
        ("Calculations:", entries.len()),
        ("Not permitted:", not_permitted),
        ("With overflow:", with_overflow),
    ];
    for (i, (label, value)) in rows.iter().enumerate() {
        let row = (i + 2) as u32;
        sheet
            .write_string(row, 0, *label)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 1, *value as f64)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    sheet
        .write_string_with_format(6, 0, "Grade Distribution", &header_format)
        .map_err(|e| Error::Excel(e.to_string()))?;

    let grades = [
        LoadGrade::Light,
        LoadGrade::Good,
        LoadGrade::Full,
        LoadGrade::Over,
    ];
    for (i, grade) in grades.iter().enumerate() {
        let row = (i + 7) as u32;
        let count = entries
            .iter()
            .filter(|e| LoadGrade::from_ratio(e.overall) == *grade)
            .count();
        sheet
            .write_string(row, 0, grade.label())
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 1, count as f64)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    Ok(())
}

fn write_details_sheet(sheet: &mut Worksheet, entries: &[SessionEntry]) -> Result<()> {
    sheet
        .set_name("Details")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();
    let percent_format = Format::new().set_num_format("0.0%");

    for (col, header) in SESSION_HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    for (row_idx, entry) in entries.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        let inputs = &entry.inputs;

        let text = [
            (0u16, entry.id.clone()),
            (1, entry.timestamp.to_rfc3339()),
            (2, inputs.vehicle_id.clone()),
            (5, yes_no(inputs.double_stack).to_string()),
            (6, inputs.fill_order.to_string()),
            (7, yes_no(inputs.multi_drop).to_string()),
            (12, entry.limiting.label().to_string()),
            (14, yes_no(entry.permitted).to_string()),
        ];
        for (col, value) in &text {
            sheet
                .write_string(row, *col, value)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }

        let numbers = [
            (3u16, inputs.doors),
            (4, inputs.pallets),
            (8, entry.stillages as f64),
            (15, entry.overflow as f64),
        ];
        for (col, value) in &numbers {
            sheet
                .write_number(row, *col, *value)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }

        let ratios = [
            (9u16, entry.floor_ratio),
            (10, entry.cube_ratio),
            (11, entry.weight_ratio),
            (13, entry.overall),
        ];
        for (col, value) in &ratios {
            sheet
                .write_number_with_format(row, *col, *value, &percent_format)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }
    }

    sheet.autofit();

    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{PlanRequest, Planner, Session};
    use crate::constants::default_catalog;
    use tempfile::tempdir;
    use wagon_domain::model::{CapacityAllowance, LoadConstants};
    use wagon_infra::persistence::InMemorySessionLogRepository;

    fn entries() -> Vec<SessionEntry> {
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
        for (doors, pallets) in [(14.0, 0.0), (30.0, 4.0)] {
            session
                .plan_and_record(&PlanRequest {
                    doors,
                    pallets,
                    vehicle_id: Some("rigid-7.5t".to_string()),
                    ..PlanRequest::default()
                })
                .unwrap();
        }
        session.entries().unwrap()
    }

    #[test]
    fn test_export_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.csv");
        export_session(&entries(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("id,timestamp,vehicle"));
    }

    #[test]
    fn test_export_xlsx() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Session.XLSX");
        export_session(&entries(), &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_export_unknown_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.pdf");
        assert!(matches!(
            export_session(&entries(), &path),
            Err(Error::InvalidInput(_))
        ));
        assert!(!path.exists());
    }
}
