//! Domain types shared by the trip and diesel modules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The two currencies the fleet invoices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "ZAR")]
    Zar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Active,
    Flagged,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    Internal,
    External,
}

/// Where a flagged cost entry stands in its investigation.
///
/// Only [`InvestigationStatus::Resolved`] clears the entry; a flagged entry
/// with any other status (or none at all) counts as unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestigationStatus {
    Pending,
    InProgress,
    Resolved,
}

/// Opaque reference to an uploaded document. Stored and forwarded, never read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
}

/// One cost line against a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEntry {
    pub id: String,
    pub amount: f64,
    pub category: String,
    pub reference_number: Option<String>,
    #[serde(default)]
    pub is_flagged: bool,
    pub is_system_generated: Option<bool>,
    pub investigation_status: Option<InvestigationStatus>,
    pub flagged_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl CostEntry {
    /// True when this entry still blocks trip completion.
    pub fn is_unresolved(&self) -> bool {
        self.is_flagged && self.investigation_status != Some(InvestigationStatus::Resolved)
    }
}

/// A cost added on top of the regular cost entries (demurrage, clearing
/// fees, escort fees and so on). Never flagged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditionalCost {
    pub id: String,
    pub amount: f64,
    pub cost_type: String,
}

/// One logistics job for one fleet vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub driver_name: String,
    pub fleet_number: String,
    pub client_name: String,
    pub route: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub base_revenue: f64,
    pub revenue_currency: Currency,
    pub distance_km: f64,
    pub client_type: ClientType,
    pub status: TripStatus,
    #[serde(default)]
    pub costs: Vec<CostEntry>,
    #[serde(default)]
    pub additional_costs: Vec<AdditionalCost>,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_by: Option<String>,
}

/// One diesel fill event at a pump or depot.
///
/// The `distance_travelled`, `km_per_litre` and `cost_per_litre` fields are
/// optional stored overrides (e.g. from a CSV import); when absent or zero the
/// evaluator derives them from the odometer readings and litres filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DieselRecord {
    pub id: String,
    pub fleet_number: String,
    pub date: NaiveDate,
    pub driver_name: String,
    pub km_reading: f64,
    pub previous_km_reading: Option<f64>,
    pub litres_filled: f64,
    pub total_cost: f64,
    pub currency: Currency,
    pub fuel_station: String,
    pub trip_id: Option<String>,
    pub distance_travelled: Option<f64>,
    pub km_per_litre: Option<f64>,
    pub cost_per_litre: Option<f64>,
    pub probe_reading: Option<f64>,
    pub probe_verified: Option<bool>,
}

/// Expected consumption configured for one fleet vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DieselNorm {
    pub fleet_number: String,
    pub expected_km_per_litre: f64,
    pub tolerance_percentage: f64,
    pub last_updated: DateTime<Utc>,
    pub updated_by: String,
}
