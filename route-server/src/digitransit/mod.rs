//! Digitransit GraphQL client.
//!
//! This module talks to the Helsinki Digitransit journey-planning API,
//! a single GraphQL endpoint reached via HTTP POST.
//!
//! Key characteristics of the upstream:
//! - Stop search has no formal server-side result limit; truncation is
//!   done client-side after receiving the full list
//! - Timestamps in planning responses are epoch milliseconds; the query's
//!   arrive-by time is a local ISO-like string
//! - A response carrying a top-level `errors` array is a failed query
//!   regardless of HTTP status
//! - Route metadata is exposed redundantly through two schema paths
//!   (`leg.route` and `leg.trip.route`) depending on leg type

mod client;
mod convert;
mod error;
mod mock;
mod queries;
mod types;

use chrono::NaiveDateTime;

use crate::domain::{Itinerary, Stop, StopId};

pub use client::{DigitransitClient, DigitransitConfig};
pub use convert::{NormalizeError, normalize_itinerary};
pub use error::DigitransitError;
pub use mock::MockDigitransit;
pub use types::{
    GraphQlError, GraphQlResponse, PlanData, RawItinerary, RawLeg, RawPlace, RawPlan, RawRoute,
    RawStop, RawStopRef, RawTrip, StopsData,
};

/// The two upstream operations the gateway depends on.
///
/// Implemented by [`DigitransitClient`] for the real API and by
/// [`MockDigitransit`] for tests and offline development. The futures are
/// required to be `Send` so implementations can be driven from axum handlers.
pub trait TransitApi: Send + Sync {
    /// Search stops by free-text name, truncated to `limit` results in
    /// upstream relevance order.
    fn find_stops(
        &self,
        name: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Stop>, DigitransitError>> + Send;

    /// Plan up to `count` itineraries between two resolved stops, arriving
    /// by `arrive_by` (local network time). Itineraries that fail to
    /// normalize are dropped, not surfaced.
    fn plan_itineraries(
        &self,
        origin: &StopId,
        destination: &StopId,
        arrive_by: NaiveDateTime,
        count: u32,
    ) -> impl Future<Output = Result<Vec<Itinerary>, DigitransitError>> + Send;
}
