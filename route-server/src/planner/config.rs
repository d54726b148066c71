//! Planner configuration.

/// Configuration parameters for the planning pipeline.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// How many candidates to request per stop-name resolution.
    /// Only the first is used for planning; the rest exist so the
    /// resolver endpoint can show callers what else matched.
    pub candidate_limit: usize,

    /// How many itineraries to request from the upstream planner,
    /// independent of how many the caller asked for.
    pub requested_itineraries: u32,

    /// Default number of itineraries returned to callers that do not
    /// specify their own cap.
    pub max_results: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            candidate_limit: 10,
            requested_itineraries: 5,
            max_results: 5,
        }
    }
}
