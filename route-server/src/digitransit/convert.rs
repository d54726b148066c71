//! Normalization of raw plan responses into domain itineraries.
//!
//! Each itinerary is normalized independently: a malformed one is rejected
//! whole (missing required fields, wrong types, negative durations) while
//! the rest of the batch survives. The only field-level softenings are the
//! route-label fallback chain and the "Unknown" stop-name presentation
//! default.

use chrono::{DateTime, NaiveTime};
use chrono_tz::Tz;

use crate::domain::{Itinerary, Leg};

use super::types::{RawItinerary, RawLeg, RawPlace};

/// Presentation fallback for a leg place with no nested stop.
pub const UNKNOWN_STOP_NAME: &str = "Unknown";

/// Why an itinerary was rejected during normalization.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NormalizeError {
    /// Required structure missing or of the wrong type
    #[error("malformed itinerary: {0}")]
    Malformed(String),

    /// Itinerary carried an empty leg list
    #[error("itinerary has no legs")]
    NoLegs,

    /// A duration field was negative
    #[error("negative duration: {0}")]
    NegativeDuration(i64),

    /// An epoch-millisecond timestamp was out of representable range
    #[error("timestamp out of range: {0}")]
    BadTimestamp(i64),
}

/// Normalize one raw itinerary into the domain model.
///
/// `tz` is the transit network's timezone, injected explicitly: epoch
/// timestamps from the upstream are converted to wall-clock times in this
/// zone, never in the ambient process timezone. Pure function: the same
/// input always yields the same output.
pub fn normalize_itinerary(raw: &serde_json::Value, tz: Tz) -> Result<Itinerary, NormalizeError> {
    let itinerary: RawItinerary =
        serde_json::from_value(raw.clone()).map_err(|e| NormalizeError::Malformed(e.to_string()))?;

    if itinerary.legs.is_empty() {
        return Err(NormalizeError::NoLegs);
    }

    // Upstream values are taken verbatim, not re-derived from the legs.
    let departure = local_time(itinerary.start_time, tz)?;
    let arrival = local_time(itinerary.end_time, tz)?;
    let duration_secs = non_negative(itinerary.duration)?;

    let legs = itinerary
        .legs
        .iter()
        .map(|leg| normalize_leg(leg, tz))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Itinerary {
        departure,
        arrival,
        duration_secs,
        legs,
    })
}

fn normalize_leg(leg: &RawLeg, tz: Tz) -> Result<Leg, NormalizeError> {
    Ok(Leg {
        mode: leg.mode.clone(),
        route: route_label(leg),
        from_stop: place_name(leg.from.as_ref()),
        to_stop: place_name(leg.to.as_ref()),
        departure: local_time(leg.start_time, tz)?,
        arrival: local_time(leg.end_time, tz)?,
        duration_secs: non_negative(leg.duration)?,
    })
}

/// Resolve a leg's route label.
///
/// The upstream schema exposes route metadata through two paths depending
/// on leg type. Sources are tried in order; the first usable short name
/// wins. New fallback sources go at the end of the array.
fn route_label(leg: &RawLeg) -> Option<String> {
    let sources = [
        leg.route.as_ref(),
        leg.trip.as_ref().and_then(|t| t.route.as_ref()),
    ];

    sources
        .into_iter()
        .flatten()
        .find_map(|route| route.short_name.clone())
}

/// Display name of a leg place, defaulting to [`UNKNOWN_STOP_NAME`] when
/// the nested stop (or its name) is absent. This is a presentation
/// fallback, not a parse failure.
fn place_name(place: Option<&RawPlace>) -> String {
    place
        .and_then(|p| p.stop.as_ref())
        .and_then(|s| s.name.clone())
        .unwrap_or_else(|| UNKNOWN_STOP_NAME.to_string())
}

/// Convert an epoch-millisecond instant to wall-clock time in `tz`.
fn local_time(epoch_ms: i64, tz: Tz) -> Result<NaiveTime, NormalizeError> {
    let instant = DateTime::from_timestamp_millis(epoch_ms)
        .ok_or(NormalizeError::BadTimestamp(epoch_ms))?;
    Ok(instant.with_timezone(&tz).time())
}

fn non_negative(secs: i64) -> Result<u32, NormalizeError> {
    u32::try_from(secs).map_err(|_| NormalizeError::NegativeDuration(secs))
}
