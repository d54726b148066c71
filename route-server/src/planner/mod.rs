//! Per-request planning pipeline.
//!
//! Composes the stop resolver and the itinerary planner: resolve both
//! endpoint names, pick the top candidate of each, issue one arrive-by
//! planning query, and hand back whatever normalized cleanly. Every
//! upstream failure degrades to fewer or zero results; nothing here
//! panics or propagates transport errors to the caller.

mod config;
mod pipeline;

pub use config::PlannerConfig;
pub use pipeline::{JourneyPlanner, Resolution};
