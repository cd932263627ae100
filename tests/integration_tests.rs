use chrono::Utc;
use fleet_trip_auditor::completion::{CompletionError, TripBoard};
use fleet_trip_auditor::diesel::aggregate::FleetSummary;
use fleet_trip_auditor::diesel::evaluate::evaluate_all;
use fleet_trip_auditor::diesel::filter::{DieselFilter, ProbeStatusFilter};
use fleet_trip_auditor::flags::all_flagged_costs;
use fleet_trip_auditor::kpi::TripKpis;
use fleet_trip_auditor::snapshot::FleetSnapshot;
use fleet_trip_auditor::trip_summary::TripSummary;
use fleet_trip_auditor::types::{InvestigationStatus, TripStatus};

fn load_sample() -> FleetSnapshot {
    let bytes = include_bytes!("fixtures/sample_fleet.json");
    FleetSnapshot::from_json(bytes).expect("Failed to parse sample snapshot")
}

#[test]
fn test_full_diesel_pipeline() {
    let snapshot = load_sample();
    let norms = snapshot.norm_book();
    let config = &snapshot.evaluator_config;

    let evals = evaluate_all(&snapshot.diesel_records, &norms, config, &snapshot.trips);
    assert_eq!(evals.len(), 3);

    // 26H: 1330 km on 380 l = 3.5 km/l against a 3.0 norm, +16.7% variance.
    let excellent = evals.iter().find(|e| e.record.id == "diesel_2").unwrap();
    assert!(excellent.efficiency_variance > 10.0);
    assert!(excellent.requires_debrief);
    assert_eq!(
        excellent.linked_trip.as_ref().unwrap().route,
        "Beitbridge - Harare"
    );

    // 22H carries a probe, unverified with a 5 litre discrepancy.
    let probed = evals.iter().find(|e| e.record.id == "diesel_3").unwrap();
    assert!(probed.has_probe);
    assert_eq!(probed.probe_discrepancy, Some(5.0));
    // 5 litres is under the snapshot's 50 litre threshold, but the reading
    // is unverified so it still needs attention.
    assert!(!probed.large_probe_discrepancy);
    assert!(probed.needs_probe_verification);

    let summary = FleetSummary::from_records(evals.iter());
    assert_eq!(summary.total_records, 3);
    assert_eq!(summary.total_litres, 1250.0);
    assert_eq!(summary.records_requiring_debrief, 1);
    assert_eq!(summary.linked_to_trips, 2);
    assert_eq!(summary.records_with_probe, 1);
    assert_eq!(summary.records_needing_probe_verification, 1);
    assert!(summary.average_km_per_litre > 0.0);

    let filter = DieselFilter {
        probe_status: Some(ProbeStatusFilter::NeedsVerification),
        ..Default::default()
    };
    let matched = filter.apply(&evals);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].record.id, "diesel_3");
}

#[test]
fn test_completion_gate_over_snapshot() {
    let snapshot = load_sample();
    let mut board = TripBoard::new(snapshot.trips);

    // trip_1 still has a pending flagged toll cost.
    let err = board.complete_trip("trip_1", "Fleet Manager", Utc::now());
    assert!(matches!(err, Err(CompletionError::UnresolvedFlags { .. })));

    // trip_2 has no flags and completes.
    board
        .complete_trip("trip_2", "Fleet Manager", Utc::now())
        .unwrap();
    assert_eq!(board.get("trip_2").unwrap().status, TripStatus::Completed);

    // Resolve trip_1's flag and try again.
    let mut entry = board.get("trip_1").unwrap().costs[1].clone();
    entry.investigation_status = Some(InvestigationStatus::Resolved);
    entry.resolved_at = Some(Utc::now());
    board.update_cost_entry("trip_1", entry).unwrap();

    board
        .complete_trip("trip_1", "Fleet Manager", Utc::now())
        .unwrap();
    assert_eq!(board.get("trip_1").unwrap().status, TripStatus::Completed);
}

#[test]
fn test_kpis_and_flag_extraction_from_snapshot() {
    let snapshot = load_sample();

    let trip_1 = snapshot.trips.iter().find(|t| t.id == "trip_1").unwrap();
    let kpis = TripKpis::from_trip(trip_1);
    assert_eq!(kpis.total_revenue, 12000.0);
    assert_eq!(kpis.total_expenses, 8325.0 + 450.0 + 600.0);
    assert_eq!(kpis.net_profit, 12000.0 - 9375.0);

    let flagged = all_flagged_costs(&snapshot.trips);
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].entry.id, "cost_2");
    assert_eq!(flagged[0].trip_fleet_number, "6H");
}

#[test]
fn test_trip_summary_over_snapshot() {
    let snapshot = load_sample();
    let summary = TripSummary::from_trips(&snapshot.trips);

    assert_eq!(summary.total_trips, 2);
    assert_eq!(summary.zar_revenue, 12000.0);
    assert_eq!(summary.zar_costs, 8325.0 + 450.0);
    assert_eq!(summary.usd_revenue, 4000.0);
    assert_eq!(summary.flagged_costs, 1);
    assert_eq!(summary.unresolved_flags, 1);
    assert_eq!(summary.resolved_flags, 0);

    let enock = &summary.driver_stats["Enock Mukonyerwa"];
    assert_eq!(enock.trips, 1);
    assert_eq!(enock.flags, 1);
    assert_eq!(enock.flag_percentage, 100.0);
    assert_eq!(enock.avg_flags_per_trip, 1.0);

    assert_eq!(summary.top_flagged_categories[0].category, "Tolls");
    assert_eq!(summary.trips_ready_for_completion, vec!["trip_2"]);
    assert_eq!(summary.trips_with_unresolved_flags, vec!["trip_1"]);
}
