use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use route_server::digitransit::{DigitransitClient, DigitransitConfig};
use route_server::planner::{JourneyPlanner, PlannerConfig};
use route_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("route_server=info")),
        )
        .init();

    // Upstream configuration from the environment
    let mut config = DigitransitConfig::new();

    if let Ok(url) = std::env::var("DIGITRANSIT_API_URL") {
        config = config.with_base_url(url);
    }

    match std::env::var("DIGITRANSIT_SUBSCRIPTION_KEY") {
        Ok(key) => config = config.with_subscription_key(key),
        Err(_) => {
            warn!("DIGITRANSIT_SUBSCRIPTION_KEY not set; upstream may reject requests");
        }
    }

    if let Ok(tz) = std::env::var("ROUTE_TIMEZONE") {
        let tz = tz
            .parse()
            .unwrap_or_else(|_| panic!("ROUTE_TIMEZONE is not a valid IANA timezone: {tz}"));
        config = config.with_timezone(tz);
    }

    info!(base_url = %config.base_url, timezone = %config.timezone, "starting gateway");

    let client = DigitransitClient::new(config).expect("Failed to create Digitransit client");
    let planner = JourneyPlanner::new(client, PlannerConfig::default());

    let state = AppState::new(planner);
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!(%addr, "listening");
    info!("endpoints: GET /health, GET /routes, GET /stops/search");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
