//! Fleet-wide summary fold over evaluated diesel records.

use serde::Serialize;

use crate::diesel::classify::PerformanceStatus;
use crate::diesel::evaluate::EvaluatedDieselRecord;
use crate::numeric::safe_div;
use crate::types::Currency;

/// Running totals and fleet-wide rates for a set of evaluated records.
///
/// The fold is a sum of independent per-record contributions, so the result
/// does not depend on input order.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FleetSummary {
    pub total_records: usize,
    pub total_litres: f64,
    pub total_cost: f64,
    pub total_distance: f64,

    pub records_requiring_debrief: usize,
    pub poor_performance_records: usize,
    pub excellent_performance_records: usize,
    pub linked_to_trips: usize,

    pub records_with_probe: usize,
    pub records_needing_probe_verification: usize,
    pub records_with_verified_probe: usize,

    pub usd_records: usize,
    pub zar_records: usize,
    pub usd_total_cost: f64,
    pub zar_total_cost: f64,

    pub average_km_per_litre: f64,
    pub average_cost_per_km: f64,
}

impl FleetSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a EvaluatedDieselRecord>,
    {
        let mut s = FleetSummary::default();

        for eval in records {
            s.total_records += 1;
            s.total_litres += eval.record.litres_filled;
            s.total_cost += eval.record.total_cost;
            s.total_distance += eval.distance_travelled;

            if eval.requires_debrief {
                s.records_requiring_debrief += 1;
            }
            match eval.performance_status {
                PerformanceStatus::Poor => s.poor_performance_records += 1,
                PerformanceStatus::Excellent => s.excellent_performance_records += 1,
                PerformanceStatus::Normal => {}
            }
            if eval.record.trip_id.is_some() {
                s.linked_to_trips += 1;
            }
            if eval.has_probe {
                s.records_with_probe += 1;
            }
            if eval.needs_probe_verification {
                s.records_needing_probe_verification += 1;
            }
            if eval.record.probe_verified.unwrap_or(false) {
                s.records_with_verified_probe += 1;
            }

            match eval.record.currency {
                Currency::Usd => {
                    s.usd_records += 1;
                    s.usd_total_cost += eval.record.total_cost;
                }
                Currency::Zar => {
                    s.zar_records += 1;
                    s.zar_total_cost += eval.record.total_cost;
                }
            }
        }

        s.average_km_per_litre = safe_div(s.total_distance, s.total_litres);
        s.average_cost_per_km = safe_div(s.total_cost, s.total_distance);
        s
    }
}
