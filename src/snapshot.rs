//! JSON snapshot exchange with the host application.
//!
//! The host materializes trips, diesel records, norms and the evaluator
//! configuration into a single JSON document; this module loads and saves it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::diesel::norms::{EvaluatorConfig, NormBook};
use crate::types::{DieselNorm, DieselRecord, Trip};

/// Everything a run operates on, as handed over by the host.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FleetSnapshot {
    #[serde(default)]
    pub trips: Vec<Trip>,
    #[serde(default)]
    pub diesel_records: Vec<DieselRecord>,
    #[serde(default)]
    pub norms: Vec<DieselNorm>,
    #[serde(default)]
    pub evaluator_config: EvaluatorConfig,
}

impl FleetSnapshot {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("invalid fleet snapshot JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("reading snapshot {}", path.display()))?;
        Self::from_json(&bytes)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        Ok(())
    }

    pub fn norm_book(&self) -> NormBook {
        NormBook::new(self.norms.clone())
    }
}
