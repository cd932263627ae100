//! Conjunctive filters over the trip list. An unset criterion always passes.

use chrono::NaiveDate;

use crate::types::{Currency, Trip};

#[derive(Debug, Default, Clone)]
pub struct TripFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub client: Option<String>,
    pub driver: Option<String>,
    pub currency: Option<Currency>,
}

impl TripFilter {
    pub fn matches(&self, trip: &Trip) -> bool {
        if let Some(start) = self.start_date {
            if trip.start_date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if trip.end_date > end {
                return false;
            }
        }
        if let Some(client) = &self.client {
            if trip.client_name != *client {
                return false;
            }
        }
        if let Some(driver) = &self.driver {
            if trip.driver_name != *driver {
                return false;
            }
        }
        if let Some(currency) = self.currency {
            if trip.revenue_currency != currency {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, trips: &'a [Trip]) -> Vec<&'a Trip> {
        trips.iter().filter(|t| self.matches(t)).collect()
    }
}
