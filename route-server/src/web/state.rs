//! Application state for the web layer.

use std::sync::Arc;

use crate::digitransit::DigitransitClient;
use crate::planner::JourneyPlanner;

/// Shared application state: the planner is the only service the handlers
/// need, and it is stateless across requests.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<JourneyPlanner<DigitransitClient>>,
}

impl AppState {
    pub fn new(planner: JourneyPlanner<DigitransitClient>) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }
}
