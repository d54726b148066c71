//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use tracing::{error, info};

use crate::planner::Resolution;

use super::dto::*;
use super::state::AppState;

/// Hard cap on the stop-search candidate count a caller may request.
const MAX_SEARCH_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/routes", get(get_routes))
        .route("/stops/search", get(search_stops))
        .with_state(state)
}

/// Service identity and liveness.
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "Transit Routing Gateway",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Detailed health check: probes the upstream with a one-stop search.
///
/// `healthy` means the probe returned matches, `degraded` means the query
/// executed but matched nothing, `unhealthy` means the upstream itself
/// was unreachable.
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let upstream = match state.planner.resolve("Aalto", 1).await {
        Resolution::Stops(stops) if !stops.is_empty() => "healthy",
        Resolution::Stops(_) => "degraded",
        Resolution::UpstreamUnavailable => "unhealthy",
    };

    Json(serde_json::json!({
        "service": "Transit Routing Gateway",
        "status": "healthy",
        "components": {
            "digitransit_api": upstream,
        },
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Plan journeys between two named stops, arriving by a target time.
async fn get_routes(
    State(state): State<AppState>,
    Query(req): Query<RouteQuery>,
) -> Result<Json<RouteResponse>, AppError> {
    let arrive_by = parse_arrival_time(&req.arrival_time).map_err(|_| AppError::BadRequest {
        message: format!(
            "arrival_time must be in yyyyMMddHHmmss format, got: {}",
            req.arrival_time
        ),
    })?;

    info!(
        start = %req.start_stop,
        end = %req.end_stop,
        arrival = %req.arrival_time,
        "processing route request"
    );

    let max_results = state.planner.config().max_results;
    let itineraries = state
        .planner
        .plan(&req.start_stop, &req.end_stop, arrive_by, max_results)
        .await;

    Ok(Json(RouteResponse {
        routes: itineraries.iter().map(RouteResult::from_itinerary).collect(),
        query: QueryEcho {
            arrival_time: req.arrival_time,
            start_stop: req.start_stop,
            end_stop: req.end_stop,
        },
    }))
}

/// Search stops by name, exposing the full candidate list so callers can
/// disambiguate same-named stops themselves.
async fn search_stops(
    State(state): State<AppState>,
    Query(req): Query<StopSearchQuery>,
) -> Json<StopSearchResponse> {
    let limit = req
        .limit
        .unwrap_or(state.planner.config().candidate_limit)
        .min(MAX_SEARCH_LIMIT);

    let stops = state.planner.resolve_stops(&req.q, limit).await;

    Json(StopSearchResponse {
        stops: stops.iter().map(StopResult::from_stop).collect(),
    })
}

/// Errors surfaced to HTTP callers.
///
/// Upstream failures never appear here: the planner absorbs them into
/// empty results. This type only covers caller mistakes.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        error!(status = %status, message = %message, "request failed");

        let body = Json(ErrorResponse {
            error: message,
            details: Some(format!("HTTP {}", status.as_u16())),
        });
        (status, body).into_response()
    }
}
