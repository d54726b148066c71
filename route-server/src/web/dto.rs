//! Data transfer objects for web requests and responses.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::{Itinerary, Leg, Stop};

/// Format accepted for the `arrival_time` query parameter.
const ARRIVAL_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Query parameters for `GET /routes`.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// Target arrival time, `yyyyMMddHHmmss` in network local time.
    pub arrival_time: String,

    /// Free-text name of the departure stop.
    pub start_stop: String,

    /// Free-text name of the destination stop.
    pub end_stop: String,
}

/// Parse the 14-digit arrival time. Format validation is this layer's
/// responsibility; the core only ever sees an already-parsed timestamp.
pub fn parse_arrival_time(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, ARRIVAL_TIME_FORMAT)
}

/// Query parameters for `GET /stops/search`.
#[derive(Debug, Deserialize)]
pub struct StopSearchQuery {
    /// Free-text stop name.
    pub q: String,

    /// Maximum number of candidates to return.
    pub limit: Option<usize>,
}

/// Response for `GET /routes`: routes plus an echo of the query.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub routes: Vec<RouteResult>,
    pub query: QueryEcho,
}

/// The caller's query, echoed back verbatim.
#[derive(Debug, Serialize)]
pub struct QueryEcho {
    pub arrival_time: String,

    #[serde(rename = "from")]
    pub start_stop: String,

    #[serde(rename = "to")]
    pub end_stop: String,
}

/// One journey option in a response.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// Overall departure time, `HH:MM:SS`.
    pub departure_time: String,

    /// Overall arrival time, `HH:MM:SS`.
    pub arrival_time: String,

    /// Total duration in seconds.
    pub duration: u32,

    /// Journey legs in travel order.
    pub legs: Vec<LegResult>,
}

impl RouteResult {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            departure_time: format_time(itinerary.departure),
            arrival_time: format_time(itinerary.arrival),
            duration: itinerary.duration_secs,
            legs: itinerary.legs.iter().map(LegResult::from_leg).collect(),
        }
    }
}

/// One leg of a journey in a response.
#[derive(Debug, Serialize)]
pub struct LegResult {
    /// Transport mode (`BUS`, `RAIL`, `WALK`, ...).
    pub mode: String,

    /// Route label; `null` for walking legs.
    pub route: Option<String>,

    /// Departure stop name.
    #[serde(rename = "from")]
    pub from_stop: String,

    /// Arrival stop name.
    #[serde(rename = "to")]
    pub to_stop: String,

    /// Leg departure time, `HH:MM:SS`.
    pub departure: String,

    /// Leg arrival time, `HH:MM:SS`.
    pub arrival: String,

    /// Leg duration in seconds.
    pub duration: u32,
}

impl LegResult {
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            mode: leg.mode.clone(),
            route: leg.route.clone(),
            from_stop: leg.from_stop.clone(),
            to_stop: leg.to_stop.clone(),
            departure: format_time(leg.departure),
            arrival: format_time(leg.arrival),
            duration: leg.duration_secs,
        }
    }
}

/// A stop candidate in `GET /stops/search` results.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl StopResult {
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            id: stop.id.as_str().to_string(),
            name: stop.name.clone(),
            lat: stop.lat,
            lon: stop.lon,
        }
    }
}

/// Response for `GET /stops/search`.
#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    pub stops: Vec<StopResult>,
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}
