//! Canonical transit stops.

use std::fmt;

/// Opaque upstream-assigned stop identifier (GTFS id, e.g. `HSL:1010101`).
///
/// The upstream is the sole authority on these; we never parse or
/// interpret their structure, only pass them back in planning queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StopId(String);

impl StopId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A canonical transit stop as returned by the upstream stop search.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Stable upstream identifier.
    pub id: StopId,

    /// Display name.
    pub name: String,

    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lon: f64,
}
