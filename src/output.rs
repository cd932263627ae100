//! Output formatting and persistence for evaluated records and summaries.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::diesel::classify::PerformanceStatus;
use crate::diesel::evaluate::EvaluatedDieselRecord;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs any serializable report as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Flat CSV row for one evaluated diesel record.
#[derive(Debug, Serialize)]
struct EvaluatedRow<'a> {
    id: &'a str,
    fleet_number: &'a str,
    date: chrono::NaiveDate,
    driver_name: &'a str,
    litres_filled: f64,
    total_cost: f64,
    distance_travelled: f64,
    km_per_litre: f64,
    cost_per_km: f64,
    cost_per_litre: f64,
    expected_km_per_litre: f64,
    efficiency_variance: f64,
    performance_status: PerformanceStatus,
    requires_debrief: bool,
    has_probe: bool,
    probe_discrepancy: Option<f64>,
    large_probe_discrepancy: bool,
    needs_probe_verification: bool,
}

/// Appends evaluated diesel records as rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_evaluated_records(path: &str, evals: &[&EvaluatedDieselRecord]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for eval in evals {
        writer.serialize(EvaluatedRow {
            id: &eval.record.id,
            fleet_number: &eval.record.fleet_number,
            date: eval.record.date,
            driver_name: &eval.record.driver_name,
            litres_filled: eval.record.litres_filled,
            total_cost: eval.record.total_cost,
            distance_travelled: eval.distance_travelled,
            km_per_litre: eval.km_per_litre,
            cost_per_km: eval.cost_per_km,
            cost_per_litre: eval.cost_per_litre,
            expected_km_per_litre: eval.expected_km_per_litre,
            efficiency_variance: eval.efficiency_variance,
            performance_status: eval.performance_status,
            requires_debrief: eval.requires_debrief,
            has_probe: eval.has_probe,
            probe_discrepancy: eval.probe_discrepancy,
            large_probe_discrepancy: eval.large_probe_discrepancy,
            needs_probe_verification: eval.needs_probe_verification,
        })?;
    }
    writer.flush()?;

    Ok(())
}
