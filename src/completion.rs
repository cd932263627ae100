//! Trip completion gate and cost-entry mutations.
//!
//! [`TripBoard`] owns a locally materialized snapshot of trips. Mutations are
//! synchronous read-modify-writes against that snapshot; serializing
//! concurrent completion attempts on the same trip is the caller's job (via
//! its store's transaction primitive), not this module's.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::flags::{can_complete, unresolved_flags_count};
use crate::types::{CostEntry, Trip, TripStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompletionError {
    /// Addressing a trip absent from the snapshot is a data-integrity error
    /// on the caller's side and is never absorbed.
    #[error("trip {0} not found")]
    TripNotFound(String),

    #[error("cost entry {0} not found")]
    CostEntryNotFound(String),

    /// The gate itself: the reason string is rendered to the operator as-is.
    #[error("cannot complete trip {trip_id}: unresolved flagged cost entries present")]
    UnresolvedFlags { trip_id: String, unresolved: usize },

    /// There is no transition out of completed, including re-completing.
    #[error("trip {0} is already completed")]
    AlreadyCompleted(String),
}

/// A snapshot of trips with the completion gate and cost mutations on top.
#[derive(Debug, Default)]
pub struct TripBoard {
    trips: Vec<Trip>,
}

impl TripBoard {
    pub fn new(trips: Vec<Trip>) -> Self {
        Self { trips }
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn into_trips(self) -> Vec<Trip> {
        self.trips
    }

    pub fn get(&self, trip_id: &str) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id == trip_id)
    }

    fn get_mut(&mut self, trip_id: &str) -> Result<&mut Trip, CompletionError> {
        self.trips
            .iter_mut()
            .find(|t| t.id == trip_id)
            .ok_or_else(|| CompletionError::TripNotFound(trip_id.to_string()))
    }

    /// Requests the `active → completed` transition for one trip.
    ///
    /// Rejected while any flagged cost entry is unresolved; on acceptance the
    /// status flips to completed and the timestamp and actor are recorded.
    pub fn complete_trip(
        &mut self,
        trip_id: &str,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<(), CompletionError> {
        let trip = self.get_mut(trip_id)?;

        if trip.status == TripStatus::Completed {
            return Err(CompletionError::AlreadyCompleted(trip_id.to_string()));
        }

        if !can_complete(&trip.costs) {
            return Err(CompletionError::UnresolvedFlags {
                trip_id: trip_id.to_string(),
                unresolved: unresolved_flags_count(&trip.costs),
            });
        }

        trip.status = TripStatus::Completed;
        trip.completed_at = Some(now);
        trip.completed_by = Some(actor.to_string());
        info!(trip_id, actor, "Trip completed");
        Ok(())
    }

    /// Records a new cost entry against a trip and returns its id.
    pub fn add_cost_entry(
        &mut self,
        trip_id: &str,
        entry: CostEntry,
    ) -> Result<String, CompletionError> {
        let trip = self.get_mut(trip_id)?;
        let id = entry.id.clone();
        trip.costs.push(entry);
        Ok(id)
    }

    /// Replaces the cost entry with the same id on the given trip.
    pub fn update_cost_entry(
        &mut self,
        trip_id: &str,
        entry: CostEntry,
    ) -> Result<(), CompletionError> {
        let trip = self.get_mut(trip_id)?;
        let slot = trip
            .costs
            .iter_mut()
            .find(|c| c.id == entry.id)
            .ok_or_else(|| CompletionError::CostEntryNotFound(entry.id.clone()))?;
        *slot = entry;
        Ok(())
    }

    /// Removes a cost entry, searching across all trips in the snapshot.
    pub fn delete_cost_entry(&mut self, cost_entry_id: &str) -> Result<(), CompletionError> {
        let trip = self
            .trips
            .iter_mut()
            .find(|t| t.costs.iter().any(|c| c.id == cost_entry_id))
            .ok_or_else(|| CompletionError::CostEntryNotFound(cost_entry_id.to_string()))?;
        trip.costs.retain(|c| c.id != cost_entry_id);
        Ok(())
    }
}
