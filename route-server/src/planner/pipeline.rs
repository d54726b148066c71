//! The two-stage resolve-then-plan pipeline.

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::digitransit::TransitApi;
use crate::domain::{Itinerary, Stop};

use super::config::PlannerConfig;

/// Hard cap on how many itineraries a single call may request, whatever
/// the caller asks for.
pub const MAX_ITINERARIES: usize = 50;

/// Outcome of one stop-name resolution.
///
/// The public contract collapses "no matches" and "upstream failed" into
/// the same empty sequence; this type keeps them apart internally so logs
/// can tell the two stories. It never crosses the gateway's boundary.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The query executed; the list may legitimately be empty.
    Stops(Vec<Stop>),

    /// The query itself failed (transport, status, or GraphQL error).
    UpstreamUnavailable,
}

impl Resolution {
    /// Highest-relevance candidate, if any.
    pub fn first(&self) -> Option<&Stop> {
        match self {
            Resolution::Stops(stops) => stops.first(),
            Resolution::UpstreamUnavailable => None,
        }
    }

    /// Collapse to the externally visible shape.
    pub fn into_stops(self) -> Vec<Stop> {
        match self {
            Resolution::Stops(stops) => stops,
            Resolution::UpstreamUnavailable => Vec::new(),
        }
    }
}

/// Resolves stop names and plans arrive-by journeys through a transit API.
///
/// Holds no per-request state; one instance serves all requests.
#[derive(Debug, Clone)]
pub struct JourneyPlanner<C> {
    client: C,
    config: PlannerConfig,
}

impl<C: TransitApi> JourneyPlanner<C> {
    pub fn new(client: C, config: PlannerConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Resolve a free-text stop name to at most `limit` candidates, in
    /// upstream relevance order.
    ///
    /// Failures are absorbed: a dead upstream and an unknown name both
    /// come back as an empty list, distinguishable only in the logs.
    pub async fn resolve_stops(&self, name: &str, limit: usize) -> Vec<Stop> {
        self.resolve(name, limit).await.into_stops()
    }

    /// Like [`resolve_stops`](Self::resolve_stops) but without collapsing
    /// the outcome, for callers that need to tell "no matches" from
    /// "upstream unavailable" (health probes, logging).
    pub async fn resolve(&self, name: &str, limit: usize) -> Resolution {
        match self.client.find_stops(name, limit).await {
            Ok(stops) => {
                debug!(query = name, matches = stops.len(), "stop search completed");
                Resolution::Stops(stops)
            }
            Err(e) => {
                warn!(query = name, error = %e, "stop search failed");
                Resolution::UpstreamUnavailable
            }
        }
    }

    /// Plan journeys from `origin_name` to `destination_name`, arriving by
    /// `arrive_by` (local network time), returning at most
    /// `max_itineraries` options in the upstream's ranking order.
    ///
    /// An empty result means one of: a name matched nothing, the upstream
    /// was unreachable, or the upstream genuinely found no journeys. The
    /// logs distinguish these; the return value deliberately does not.
    pub async fn plan(
        &self,
        origin_name: &str,
        destination_name: &str,
        arrive_by: NaiveDateTime,
        max_itineraries: usize,
    ) -> Vec<Itinerary> {
        let limit = self.config.candidate_limit;

        // Both resolutions are independent; run them concurrently.
        let (origin_res, destination_res) = futures::join!(
            self.resolve(origin_name, limit),
            self.resolve(destination_name, limit),
        );

        let Some(origin) = pick_candidate(&origin_res, origin_name) else {
            return Vec::new();
        };
        let Some(destination) = pick_candidate(&destination_res, destination_name) else {
            return Vec::new();
        };

        info!(
            from = %origin.id,
            from_name = %origin.name,
            to = %destination.id,
            to_name = %destination.name,
            "planning journey"
        );

        let result = self
            .client
            .plan_itineraries(
                &origin.id,
                &destination.id,
                arrive_by,
                self.config.requested_itineraries,
            )
            .await;

        match result {
            Ok(mut itineraries) => {
                itineraries.truncate(max_itineraries.min(MAX_ITINERARIES));
                itineraries
            }
            Err(e) => {
                warn!(
                    from = origin_name,
                    to = destination_name,
                    error = %e,
                    "journey planning failed"
                );
                Vec::new()
            }
        }
    }
}

/// First-candidate selection: the top upstream match is taken as the
/// canonical stop, with no disambiguation at this layer.
fn pick_candidate<'a>(resolution: &'a Resolution, name: &str) -> Option<&'a Stop> {
    match resolution.first() {
        Some(stop) => Some(stop),
        None => {
            match resolution {
                Resolution::UpstreamUnavailable => {
                    warn!(query = name, "resolution unavailable, returning no journeys");
                }
                Resolution::Stops(_) => {
                    info!(query = name, "no stops matched");
                }
            }
            None
        }
    }
}
