//! Mock transit API for testing without network access.
//!
//! Serves canned stops and itineraries through the same [`TransitApi`]
//! surface as the real client, and records planning calls so tests can
//! assert on what was (or was not) queried.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDateTime;

use crate::domain::{Itinerary, Stop, StopId};

use super::TransitApi;
use super::error::DigitransitError;

/// In-memory [`TransitApi`] implementation.
///
/// Stop search matches case-insensitively on name substrings, which is a
/// rough stand-in for the upstream's fuzzier matching but preserves the
/// property the gateway relies on: results come back in a stable order.
#[derive(Debug, Default)]
pub struct MockDigitransit {
    stops: Vec<Stop>,
    itineraries: Vec<Itinerary>,
    fail: bool,
    plan_calls: AtomicUsize,
    last_plan: Mutex<Option<(StopId, StopId)>>,
}

impl MockDigitransit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add stops to serve from `find_stops`.
    pub fn with_stops(mut self, stops: Vec<Stop>) -> Self {
        self.stops = stops;
        self
    }

    /// Set the itineraries every planning call returns.
    pub fn with_itineraries(mut self, itineraries: Vec<Itinerary>) -> Self {
        self.itineraries = itineraries;
        self
    }

    /// Make every call fail with an upstream error.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// How many planning queries have been issued.
    pub fn plan_calls(&self) -> usize {
        self.plan_calls.load(Ordering::SeqCst)
    }

    /// The origin/destination ids of the most recent planning query.
    pub fn last_plan(&self) -> Option<(StopId, StopId)> {
        self.last_plan.lock().unwrap().clone()
    }

    fn unavailable() -> DigitransitError {
        DigitransitError::Api {
            status: 503,
            message: "mock upstream unavailable".to_string(),
        }
    }
}

impl TransitApi for MockDigitransit {
    async fn find_stops(&self, name: &str, limit: usize) -> Result<Vec<Stop>, DigitransitError> {
        if self.fail {
            return Err(Self::unavailable());
        }

        let needle = name.to_lowercase();
        let mut matches: Vec<Stop> = self
            .stops
            .iter()
            .filter(|stop| stop.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.truncate(limit);

        Ok(matches)
    }

    async fn plan_itineraries(
        &self,
        origin: &StopId,
        destination: &StopId,
        _arrive_by: NaiveDateTime,
        count: u32,
    ) -> Result<Vec<Itinerary>, DigitransitError> {
        self.plan_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_plan.lock().unwrap() = Some((origin.clone(), destination.clone()));

        if self.fail {
            return Err(Self::unavailable());
        }

        let mut itineraries = self.itineraries.clone();
        itineraries.truncate(count as usize);
        Ok(itineraries)
    }
}
