//! Per-record diesel efficiency evaluation.

use serde::Serialize;

use crate::diesel::classify::{PerformanceStatus, classify};
use crate::diesel::norms::{EvaluatorConfig, NormBook};
use crate::numeric::{pct_of, safe_div};
use crate::types::{DieselRecord, Trip};

/// Trip context attached to an evaluated record when the fill is linked.
#[derive(Debug, Clone, Serialize)]
pub struct LinkedTripInfo {
    pub route: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
}

/// A diesel record with the full derived field set layered on top.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluatedDieselRecord {
    #[serde(flatten)]
    pub record: DieselRecord,

    pub distance_travelled: f64,
    pub km_per_litre: f64,
    pub cost_per_km: f64,
    pub cost_per_litre: f64,

    pub expected_km_per_litre: f64,
    pub tolerance_percentage: f64,
    pub efficiency_variance: f64,
    pub performance_status: PerformanceStatus,
    pub requires_debrief: bool,

    pub has_probe: bool,
    pub probe_discrepancy: Option<f64>,
    /// |litres filled − probe reading| exceeded the threshold the record was
    /// evaluated under.
    pub large_probe_discrepancy: bool,
    pub needs_probe_verification: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_trip: Option<LinkedTripInfo>,
}

impl EvaluatedDieselRecord {
    /// Evaluates one fill against its vehicle's norm.
    ///
    /// Stored non-zero distance/rate values win over derivation; every
    /// division is zero-guarded so degenerate records evaluate to zero rates
    /// rather than failing.
    pub fn evaluate(
        record: &DieselRecord,
        norms: &NormBook,
        config: &EvaluatorConfig,
    ) -> Self {
        let distance_travelled = match record.distance_travelled {
            Some(d) if d != 0.0 => d,
            _ => match record.previous_km_reading {
                Some(prev) => record.km_reading - prev,
                None => 0.0,
            },
        };

        let km_per_litre = match record.km_per_litre {
            Some(rate) if rate != 0.0 => rate,
            _ => safe_div(distance_travelled, record.litres_filled),
        };

        let cost_per_km = safe_div(record.total_cost, distance_travelled);
        let cost_per_litre = record
            .cost_per_litre
            .unwrap_or_else(|| safe_div(record.total_cost, record.litres_filled));

        let (expected_km_per_litre, tolerance_percentage) =
            norms.expectation(&record.fleet_number, config);
        let efficiency_variance = pct_of(
            km_per_litre - expected_km_per_litre,
            expected_km_per_litre,
        );
        let performance_status = classify(efficiency_variance, tolerance_percentage);

        let has_probe = config.has_probe(&record.fleet_number);
        let probe_discrepancy = if has_probe {
            record.probe_reading.map(|probe| record.litres_filled - probe)
        } else {
            None
        };
        let large_probe_discrepancy = probe_discrepancy
            .is_some_and(|d| d.abs() > config.probe_discrepancy_threshold);
        let needs_probe_verification =
            has_probe && (!record.probe_verified.unwrap_or(false) || large_probe_discrepancy);

        EvaluatedDieselRecord {
            record: record.clone(),
            distance_travelled,
            km_per_litre,
            cost_per_km,
            cost_per_litre,
            expected_km_per_litre,
            tolerance_percentage,
            efficiency_variance,
            performance_status,
            requires_debrief: performance_status.requires_debrief(),
            has_probe,
            probe_discrepancy,
            large_probe_discrepancy,
            needs_probe_verification,
            linked_trip: None,
        }
    }

    /// Attaches route context from the linked trip, when the fill carries a
    /// trip id and the trip exists in the snapshot.
    pub fn with_linked_trip(mut self, trips: &[Trip]) -> Self {
        self.linked_trip = self
            .record
            .trip_id
            .as_deref()
            .and_then(|id| trips.iter().find(|t| t.id == id))
            .map(|t| LinkedTripInfo {
                route: t.route.clone(),
                start_date: t.start_date,
                end_date: t.end_date,
            });
        self
    }
}

/// Evaluates a whole snapshot of diesel records in input order.
pub fn evaluate_all(
    records: &[DieselRecord],
    norms: &NormBook,
    config: &EvaluatorConfig,
    trips: &[Trip],
) -> Vec<EvaluatedDieselRecord> {
    records
        .iter()
        .map(|r| EvaluatedDieselRecord::evaluate(r, norms, config).with_linked_trip(trips))
        .collect()
}
