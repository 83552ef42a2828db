use crate::core::errors::SimError;
use crate::core::execution::simulation_engine::RunOutcome;
use crate::core::report::{DailyReport, RunSummary};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    /// Daily rows, then the run summary, then any skipped days, as
    /// blank-line separated CSV blocks
    Csv,
    /// Reports, skipped days and summary in one document
    Json,
}

fn write_csv_block<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), SimError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)
            .map_err(|e| SimError::Output(e.to_string()))?;
    }
    wtr.flush().map_err(|e| SimError::Output(e.to_string()))
}

/// Write the daily reports as CSV, one header row then one row per day.
///
/// Infinite estimates are written as `inf`, missing wait times as empty fields.
pub fn write_reports_csv<W: Write>(writer: W, reports: &[DailyReport]) -> Result<(), SimError> {
    write_csv_block(writer, reports)
}

/// Write the end-of-run aggregates as a single-row CSV block
pub fn write_summary_csv<W: Write>(writer: W, summary: &RunSummary) -> Result<(), SimError> {
    write_csv_block(writer, std::slice::from_ref(summary))
}

/// Write reports, summary and skipped days as consecutive CSV blocks
pub fn write_outcome_csv<W: Write>(mut writer: W, outcome: &RunOutcome) -> Result<(), SimError> {
    write_reports_csv(&mut writer, &outcome.reports)?;
    writeln!(writer).map_err(|e| SimError::Output(e.to_string()))?;
    write_summary_csv(&mut writer, &outcome.summary)?;
    if !outcome.skipped.is_empty() {
        writeln!(writer).map_err(|e| SimError::Output(e.to_string()))?;
        write_csv_block(&mut writer, &outcome.skipped)?;
    }
    Ok(())
}

/// Write the whole outcome as pretty JSON. Infinite estimates become `null`.
pub fn write_outcome_json<W: Write>(writer: W, outcome: &RunOutcome) -> Result<(), SimError> {
    serde_json::to_writer_pretty(writer, outcome).map_err(|e| SimError::Output(e.to_string()))
}

pub fn write_outcome<W: Write>(writer: W, outcome: &RunOutcome, format: ReportFormat) -> Result<(), SimError> {
    match format {
        ReportFormat::Csv => write_outcome_csv(writer, outcome),
        ReportFormat::Json => write_outcome_json(writer, outcome),
    }
}

pub fn write_outcome_file<P: AsRef<Path>>(
    path: P,
    outcome: &RunOutcome,
    format: ReportFormat,
) -> Result<(), SimError> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| SimError::Output(format!("cannot create {}: {}", path.display(), e)))?;
    write_outcome(file, outcome, format)
}
