//! Journey itineraries and their legs.

use chrono::NaiveTime;

/// One complete journey option, composed of one or more legs.
///
/// Invariants enforced during normalization:
/// - at least one leg
/// - all durations are non-negative
///
/// The overall departure/arrival are the upstream's values taken verbatim,
/// not re-derived from the legs. If the upstream ever disagrees with its
/// own leg list, the upstream's itinerary-level values win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    /// Wall-clock departure time in the configured network timezone.
    pub departure: NaiveTime,

    /// Wall-clock arrival time in the configured network timezone.
    pub arrival: NaiveTime,

    /// Total duration in seconds.
    pub duration_secs: u32,

    /// Ordered legs, in travel order.
    pub legs: Vec<Leg>,
}

/// One continuous segment of travel on a single mode, or a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    /// Transport mode as reported by the upstream (`BUS`, `RAIL`, `WALK`, ...).
    ///
    /// Kept as an open string rather than a closed enum: the upstream may
    /// introduce new mode values at any time and we pass them through.
    pub mode: String,

    /// Route label (e.g. `550`). Absent for walking legs.
    pub route: Option<String>,

    /// Display name of the boarding stop.
    pub from_stop: String,

    /// Display name of the alighting stop.
    pub to_stop: String,

    /// Wall-clock departure time of this leg.
    pub departure: NaiveTime,

    /// Wall-clock arrival time of this leg.
    pub arrival: NaiveTime,

    /// Leg duration in seconds.
    pub duration_secs: u32,
}
