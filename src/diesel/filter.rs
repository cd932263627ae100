//! Conjunctive filter over evaluated diesel records.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::diesel::evaluate::EvaluatedDieselRecord;
use crate::types::Currency;

/// Probe-centric record categories the dashboard filters by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeStatusFilter {
    /// Vehicle carries a physical tank probe.
    HasProbe,
    /// Reconciliation is outstanding.
    NeedsVerification,
    /// Probe fitted, verified, and no large discrepancy.
    Verified,
    /// |litres filled − probe reading| above the configured threshold.
    LargeDiscrepancy,
}

/// Optional criteria combined as a conjunction; an unset criterion passes.
#[derive(Debug, Default, Clone)]
pub struct DieselFilter {
    pub fleet_number: Option<String>,
    pub driver: Option<String>,
    pub date: Option<NaiveDate>,
    pub currency: Option<Currency>,
    pub probe_status: Option<ProbeStatusFilter>,
}

impl DieselFilter {
    /// Probe categorization reads the flags baked in at evaluation time, so
    /// filtering always agrees with the threshold the records were evaluated
    /// under.
    pub fn matches(&self, eval: &EvaluatedDieselRecord) -> bool {
        if let Some(fleet) = &self.fleet_number {
            if eval.record.fleet_number != *fleet {
                return false;
            }
        }
        if let Some(driver) = &self.driver {
            if eval.record.driver_name != *driver {
                return false;
            }
        }
        if let Some(date) = self.date {
            if eval.record.date != date {
                return false;
            }
        }
        if let Some(currency) = self.currency {
            if eval.record.currency != currency {
                return false;
            }
        }
        if let Some(probe_status) = self.probe_status {
            let passes = match probe_status {
                ProbeStatusFilter::HasProbe => eval.has_probe,
                ProbeStatusFilter::NeedsVerification => eval.needs_probe_verification,
                ProbeStatusFilter::Verified => {
                    eval.has_probe
                        && eval.record.probe_verified.unwrap_or(false)
                        && !eval.large_probe_discrepancy
                }
                ProbeStatusFilter::LargeDiscrepancy => eval.large_probe_discrepancy,
            };
            if !passes {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, evals: &'a [EvaluatedDieselRecord]) -> Vec<&'a EvaluatedDieselRecord> {
        evals.iter().filter(|e| self.matches(e)).collect()
    }
}
