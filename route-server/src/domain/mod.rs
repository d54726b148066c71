//! Domain types for the routing gateway.
//!
//! These types represent normalized journey data, constructed fresh per
//! request from upstream responses. Nothing here survives past the request
//! that produced it.

mod itinerary;
mod stop;

pub use itinerary::{Itinerary, Leg};
pub use stop::{Stop, StopId};
