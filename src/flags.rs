//! Flag and investigation queries over cost entries.
//!
//! A cost entry blocks trip completion while it is flagged and its
//! investigation has not reached `resolved`. All queries here are total over
//! empty input.

use serde::Serialize;

use crate::types::{CostEntry, InvestigationStatus, Trip, TripStatus};

/// Number of entries currently flagged for investigation.
pub fn flagged_count(costs: &[CostEntry]) -> usize {
    costs.iter().filter(|c| c.is_flagged).count()
}

/// Number of flagged entries whose investigation is not yet resolved.
pub fn unresolved_flags_count(costs: &[CostEntry]) -> usize {
    costs.iter().filter(|c| c.is_unresolved()).count()
}

/// True when nothing blocks completion of a trip with these cost entries.
pub fn can_complete(costs: &[CostEntry]) -> bool {
    unresolved_flags_count(costs) == 0
}

/// Advisory signal: an active trip that had flags raised, all of which have
/// since been resolved. Prompts the host to request completion; never mutates
/// anything itself.
pub fn should_auto_complete(trip: &Trip) -> bool {
    trip.status == TripStatus::Active
        && flagged_count(&trip.costs) > 0
        && unresolved_flags_count(&trip.costs) == 0
}

/// A flagged cost entry annotated with the trip it belongs to, for the
/// fleet-wide investigation list.
#[derive(Debug, Clone, Serialize)]
pub struct FlaggedCost {
    #[serde(flatten)]
    pub entry: CostEntry,
    pub trip_id: String,
    pub trip_fleet_number: String,
    pub trip_route: String,
    pub trip_driver_name: String,
}

/// Collects every flagged cost entry across the given trips, pending entries
/// first, then most recently flagged first.
pub fn all_flagged_costs(trips: &[Trip]) -> Vec<FlaggedCost> {
    let mut flagged: Vec<FlaggedCost> = trips
        .iter()
        .flat_map(|trip| {
            trip.costs
                .iter()
                .filter(|c| c.is_flagged)
                .map(|c| FlaggedCost {
                    entry: c.clone(),
                    trip_id: trip.id.clone(),
                    trip_fleet_number: trip.fleet_number.clone(),
                    trip_route: trip.route.clone(),
                    trip_driver_name: trip.driver_name.clone(),
                })
        })
        .collect();

    flagged.sort_by(|a, b| {
        let a_pending = a.entry.investigation_status == Some(InvestigationStatus::Pending);
        let b_pending = b.entry.investigation_status == Some(InvestigationStatus::Pending);
        b_pending
            .cmp(&a_pending)
            .then_with(|| b.entry.flagged_at.cmp(&a.entry.flagged_at))
    });

    flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClientType, Currency};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn entry(id: &str, flagged: bool, status: Option<InvestigationStatus>) -> CostEntry {
        CostEntry {
            id: id.to_string(),
            amount: 100.0,
            category: "Tolls".to_string(),
            reference_number: None,
            is_flagged: flagged,
            is_system_generated: None,
            investigation_status: status,
            flagged_at: None,
            resolved_at: None,
            attachments: vec![],
        }
    }

    fn trip_with(costs: Vec<CostEntry>, status: TripStatus) -> Trip {
        Trip {
            id: "trip_1".to_string(),
            driver_name: "Jane Smith".to_string(),
            fleet_number: "6H".to_string(),
            client_name: "Client B".to_string(),
            route: "Mutare - Harare".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            base_revenue: 5000.0,
            revenue_currency: Currency::Usd,
            distance_km: 263.0,
            client_type: ClientType::Internal,
            status,
            costs,
            additional_costs: vec![],
            completed_at: None,
            completed_by: None,
        }
    }

    #[test]
    fn test_counts_on_empty_sequence() {
        assert_eq!(flagged_count(&[]), 0);
        assert_eq!(unresolved_flags_count(&[]), 0);
        assert!(can_complete(&[]));
    }

    #[test]
    fn test_unresolved_never_exceeds_flagged() {
        let costs = vec![
            entry("c1", true, Some(InvestigationStatus::Pending)),
            entry("c2", true, Some(InvestigationStatus::Resolved)),
            entry("c3", false, None),
            entry("c4", true, None),
        ];
        let flagged = flagged_count(&costs);
        let unresolved = unresolved_flags_count(&costs);
        assert!(unresolved <= flagged);
        assert!(flagged <= costs.len());
        assert_eq!(flagged, 3);
        assert_eq!(unresolved, 2);
    }

    #[test]
    fn test_can_complete_iff_no_unresolved() {
        let mut costs = vec![entry("c1", true, Some(InvestigationStatus::Pending))];
        assert!(!can_complete(&costs));

        costs[0].investigation_status = Some(InvestigationStatus::Resolved);
        assert!(can_complete(&costs));
    }

    #[test]
    fn test_should_auto_complete_requires_resolved_flags() {
        // No flags at all: nothing to prompt about.
        let trip = trip_with(vec![entry("c1", false, None)], TripStatus::Active);
        assert!(!should_auto_complete(&trip));

        // Flag still open.
        let trip = trip_with(
            vec![entry("c1", true, Some(InvestigationStatus::Pending))],
            TripStatus::Active,
        );
        assert!(!should_auto_complete(&trip));

        // All flags resolved on an active trip.
        let trip = trip_with(
            vec![entry("c1", true, Some(InvestigationStatus::Resolved))],
            TripStatus::Active,
        );
        assert!(should_auto_complete(&trip));

        // Already completed: never advise.
        let trip = trip_with(
            vec![entry("c1", true, Some(InvestigationStatus::Resolved))],
            TripStatus::Completed,
        );
        assert!(!should_auto_complete(&trip));
    }

    #[test]
    fn test_all_flagged_costs_pending_first_then_recent() {
        let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 3, 2, 8, 0, 0).unwrap();

        let mut resolved_old = entry("resolved_old", true, Some(InvestigationStatus::Resolved));
        resolved_old.flagged_at = Some(t0);
        let mut pending_old = entry("pending_old", true, Some(InvestigationStatus::Pending));
        pending_old.flagged_at = Some(t0);
        let mut pending_new = entry("pending_new", true, Some(InvestigationStatus::Pending));
        pending_new.flagged_at = Some(t1);
        let unflagged = entry("unflagged", false, None);

        let trip = trip_with(
            vec![resolved_old, pending_old, pending_new, unflagged],
            TripStatus::Active,
        );
        let flagged = all_flagged_costs(std::slice::from_ref(&trip));

        let ids: Vec<&str> = flagged.iter().map(|f| f.entry.id.as_str()).collect();
        assert_eq!(ids, vec!["pending_new", "pending_old", "resolved_old"]);
        assert!(flagged.iter().all(|f| f.trip_fleet_number == "6H"));
    }
}
