//! HTTP surface of the gateway.
//!
//! A thin axum layer over the planner: it validates caller input (the
//! 14-digit arrival-time format lives here, not in the core), invokes the
//! two core operations, and shapes JSON responses.

mod dto;
mod routes;
mod state;

pub use dto::{ErrorResponse, LegResult, RouteQuery, RouteResponse, RouteResult, StopResult};
pub use routes::create_router;
pub use state::AppState;
