//! Consumption norms and evaluator configuration.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::types::DieselNorm;

/// Injected configuration for the diesel evaluator: fallback norm values,
/// the probe discrepancy threshold, and which fleet vehicles carry a
/// physical tank probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub default_expected_km_per_litre: f64,
    pub default_tolerance_percentage: f64,
    /// Litres of |litres filled − probe reading| above which a fill must be
    /// re-verified even if it was verified before.
    pub probe_discrepancy_threshold: f64,
    pub probe_fleet: HashSet<String>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            default_expected_km_per_litre: 3.0,
            default_tolerance_percentage: 10.0,
            probe_discrepancy_threshold: 50.0,
            probe_fleet: HashSet::new(),
        }
    }
}

impl EvaluatorConfig {
    pub fn has_probe(&self, fleet_number: &str) -> bool {
        self.probe_fleet.contains(fleet_number)
    }
}

/// Per-vehicle norm lookup. One norm per fleet number; vehicles without one
/// fall back to the configured defaults.
#[derive(Debug, Default, Clone)]
pub struct NormBook {
    norms: HashMap<String, DieselNorm>,
}

impl NormBook {
    pub fn new(norms: Vec<DieselNorm>) -> Self {
        Self {
            norms: norms
                .into_iter()
                .map(|n| (n.fleet_number.clone(), n))
                .collect(),
        }
    }

    pub fn get(&self, fleet_number: &str) -> Option<&DieselNorm> {
        self.norms.get(fleet_number)
    }

    /// Expected rate and tolerance for a vehicle, falling back to the config
    /// defaults when no norm is configured.
    pub fn expectation(&self, fleet_number: &str, config: &EvaluatorConfig) -> (f64, f64) {
        match self.get(fleet_number) {
            Some(norm) => (norm.expected_km_per_litre, norm.tolerance_percentage),
            None => (
                config.default_expected_km_per_litre,
                config.default_tolerance_percentage,
            ),
        }
    }
}
