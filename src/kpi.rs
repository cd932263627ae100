//! Per-trip financial KPIs derived from the trip's cost entries.

use serde::Serialize;

use crate::numeric::{pct_of, safe_div};
use crate::types::{CostEntry, Currency, Trip};

/// Revenue, expense and profit figures for a single trip.
#[derive(Debug, Clone, Serialize)]
pub struct TripKpis {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub profit_margin: f64,
    pub cost_per_km: f64,
    pub currency: Currency,
}

/// Sums the amounts of a cost-entry sequence. Total over empty input.
pub fn total_costs(costs: &[CostEntry]) -> f64 {
    costs.iter().map(|c| c.amount).sum()
}

impl TripKpis {
    /// Derives KPIs from a trip. Pure and total: degenerate input (no costs,
    /// zero revenue, zero distance) yields zero-valued fields, never an error.
    pub fn from_trip(trip: &Trip) -> Self {
        let total_revenue = trip.base_revenue;
        let additional: f64 = trip.additional_costs.iter().map(|c| c.amount).sum();
        let total_expenses = total_costs(&trip.costs) + additional;
        let net_profit = total_revenue - total_expenses;

        TripKpis {
            total_revenue,
            total_expenses,
            net_profit,
            profit_margin: pct_of(net_profit, total_revenue),
            cost_per_km: safe_div(total_expenses, trip.distance_km),
            currency: trip.revenue_currency,
        }
    }
}
