//! Transit routing query gateway.
//!
//! Answers "how do I get from stop A to stop B, arriving by this time?"
//! by delegating to the Helsinki Digitransit GraphQL journey planner.
//! The interesting work is translating free-text stop names into canonical
//! stop identifiers, building a constrained arrive-by planning query, and
//! flattening the upstream's nested response graph into a leg-by-leg
//! itinerary model while tolerating partial responses.

pub mod digitransit;
pub mod domain;
pub mod planner;
pub mod web;
