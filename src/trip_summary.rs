//! Fleet-wide summary fold over trips.
//!
//! The trip-side counterpart of the diesel [`FleetSummary`]: per-currency
//! financial totals, flag and investigation counts, per-driver statistics and
//! completion-readiness, all derived from the flag and KPI primitives.
//!
//! [`FleetSummary`]: crate::diesel::aggregate::FleetSummary

use std::collections::BTreeMap;

use serde::Serialize;

use crate::flags::{all_flagged_costs, can_complete, flagged_count, unresolved_flags_count};
use crate::kpi::total_costs;
use crate::numeric::{pct_of, safe_div};
use crate::types::{Currency, InvestigationStatus, Trip, TripStatus};

/// Days assumed for a resolved flag whose timestamps were never recorded.
const FALLBACK_RESOLUTION_DAYS: f64 = 3.0;

/// Per-driver accumulators and derived rates.
#[derive(Debug, Default, Clone, Serialize)]
pub struct DriverStats {
    pub trips: usize,
    pub flags: usize,
    pub unresolved_flags: usize,
    pub trips_with_flags: usize,
    pub revenue: f64,
    pub expenses: f64,
    pub net_profit: f64,
    /// Share of this driver's trips that picked up at least one flag.
    pub flag_percentage: f64,
    pub avg_flags_per_trip: f64,
    pub profit_per_trip: f64,
}

/// One entry of the top-flagged-categories list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFlagCount {
    pub category: String,
    pub flags: usize,
}

/// Running totals over a set of trips. Expense figures cover the regular
/// cost entries only; additional costs stay a per-trip KPI concern.
#[derive(Debug, Default, Clone, Serialize)]
pub struct TripSummary {
    pub total_trips: usize,
    pub total_cost_entries: usize,

    pub zar_revenue: f64,
    pub zar_costs: f64,
    pub zar_profit: f64,
    pub usd_revenue: f64,
    pub usd_costs: f64,
    pub usd_profit: f64,

    pub flagged_costs: usize,
    pub unresolved_flags: usize,
    pub resolved_flags: usize,
    /// Mean days from flag to resolution across resolved flags; 0 when none
    /// are resolved.
    pub avg_resolution_days: f64,

    pub driver_stats: BTreeMap<String, DriverStats>,
    /// Up to five drivers with the most flags, most-flagged first.
    pub top_drivers_by_flags: Vec<String>,
    /// Up to five cost categories with the most flags, most-flagged first.
    pub top_flagged_categories: Vec<CategoryFlagCount>,

    /// Active trips with no unresolved flags, eligible for completion now.
    pub trips_ready_for_completion: Vec<String>,
    /// Active trips still blocked by unresolved flags.
    pub trips_with_unresolved_flags: Vec<String>,
}

impl TripSummary {
    pub fn from_trips(trips: &[Trip]) -> Self {
        let mut s = TripSummary {
            total_trips: trips.len(),
            ..Default::default()
        };

        for trip in trips {
            let costs = total_costs(&trip.costs);
            s.total_cost_entries += trip.costs.len();

            match trip.revenue_currency {
                Currency::Zar => {
                    s.zar_revenue += trip.base_revenue;
                    s.zar_costs += costs;
                }
                Currency::Usd => {
                    s.usd_revenue += trip.base_revenue;
                    s.usd_costs += costs;
                }
            }

            let trip_flags = flagged_count(&trip.costs);
            let trip_unresolved = unresolved_flags_count(&trip.costs);

            let driver = s.driver_stats.entry(trip.driver_name.clone()).or_default();
            driver.trips += 1;
            driver.flags += trip_flags;
            driver.unresolved_flags += trip_unresolved;
            driver.revenue += trip.base_revenue;
            driver.expenses += costs;
            if trip_flags > 0 {
                driver.trips_with_flags += 1;
            }

            if trip.status == TripStatus::Active {
                if can_complete(&trip.costs) {
                    s.trips_ready_for_completion.push(trip.id.clone());
                } else {
                    s.trips_with_unresolved_flags.push(trip.id.clone());
                }
            }
        }

        s.zar_profit = s.zar_revenue - s.zar_costs;
        s.usd_profit = s.usd_revenue - s.usd_costs;

        for driver in s.driver_stats.values_mut() {
            let trips = driver.trips as f64;
            driver.net_profit = driver.revenue - driver.expenses;
            driver.flag_percentage = pct_of(driver.trips_with_flags as f64, trips);
            driver.avg_flags_per_trip = safe_div(driver.flags as f64, trips);
            driver.profit_per_trip = safe_div(driver.net_profit, trips);
        }

        let mut by_flags: Vec<(&String, usize)> = s
            .driver_stats
            .iter()
            .filter(|(_, stats)| stats.flags > 0)
            .map(|(name, stats)| (name, stats.flags))
            .collect();
        by_flags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        s.top_drivers_by_flags = by_flags
            .into_iter()
            .take(5)
            .map(|(name, _)| name.clone())
            .collect();

        let flagged = all_flagged_costs(trips);
        s.flagged_costs = flagged.len();

        let mut category_flags: BTreeMap<&str, usize> = BTreeMap::new();
        let mut resolution_days_total = 0.0;

        for flag in &flagged {
            *category_flags.entry(flag.entry.category.as_str()).or_default() += 1;

            if flag.entry.investigation_status == Some(InvestigationStatus::Resolved) {
                s.resolved_flags += 1;
                resolution_days_total += match (flag.entry.flagged_at, flag.entry.resolved_at) {
                    (Some(flagged_at), Some(resolved_at)) => {
                        (resolved_at - flagged_at).num_seconds() as f64 / 86_400.0
                    }
                    _ => FALLBACK_RESOLUTION_DAYS,
                };
            } else {
                s.unresolved_flags += 1;
            }
        }

        s.avg_resolution_days = safe_div(resolution_days_total, s.resolved_flags as f64);

        let mut categories: Vec<CategoryFlagCount> = category_flags
            .into_iter()
            .map(|(category, flags)| CategoryFlagCount {
                category: category.to_string(),
                flags,
            })
            .collect();
        categories.sort_by(|a, b| b.flags.cmp(&a.flags).then_with(|| a.category.cmp(&b.category)));
        categories.truncate(5);
        s.top_flagged_categories = categories;

        s
    }
}
