//! Digitransit HTTP client.
//!
//! Executes GraphQL queries against the Digitransit routing endpoint and
//! converts responses to domain types.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::{Itinerary, Stop, StopId};

use super::TransitApi;
use super::convert::normalize_itinerary;
use super::error::DigitransitError;
use super::queries::{FIND_STOPS_QUERY, PLAN_JOURNEY_QUERY, PLAN_TIME_FORMAT};
use super::types::{GraphQlRequest, GraphQlResponse, PlanData, RawStop, StopsData};

/// Default base URL for the Digitransit HSL router.
const DEFAULT_BASE_URL: &str = "https://api.digitransit.fi/routing/v1/routers/hsl/index/graphql";

/// Default timeout for a single upstream round-trip.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Sent with every request so the upstream can attribute traffic.
const USER_AGENT: &str = concat!("route-server/", env!("CARGO_PKG_VERSION"));

/// Configuration for the Digitransit client.
#[derive(Debug, Clone)]
pub struct DigitransitConfig {
    /// GraphQL endpoint URL.
    pub base_url: String,

    /// Optional `digitransit-subscription-key` header value.
    pub subscription_key: Option<String>,

    /// Request timeout in seconds. A request that exceeds this fails fast;
    /// it is never retried here.
    pub timeout_secs: u64,

    /// Timezone of the transit network, used to render upstream epoch
    /// timestamps as wall-clock times. Explicit so the gateway behaves the
    /// same regardless of where it is deployed.
    pub timezone: Tz,
}

impl DigitransitConfig {
    /// Create a config with production defaults (HSL router, Helsinki time).
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            subscription_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            timezone: chrono_tz::Europe::Helsinki,
        }
    }

    /// Set a custom endpoint URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the subscription key.
    pub fn with_subscription_key(mut self, key: impl Into<String>) -> Self {
        self.subscription_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the network timezone.
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.timezone = tz;
        self
    }
}

impl Default for DigitransitConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the Digitransit GraphQL API.
///
/// Cheap to clone; the underlying connection pool is shared. Reuse across
/// requests is an optimization only, so per-request construction is also
/// fine.
#[derive(Debug, Clone)]
pub struct DigitransitClient {
    http: reqwest::Client,
    base_url: String,
    timezone: Tz,
}

impl DigitransitClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DigitransitConfig) -> Result<Self, DigitransitError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &config.subscription_key {
            let value = HeaderValue::from_str(key).map_err(|_| DigitransitError::Api {
                status: 0,
                message: "Invalid subscription key format".to_string(),
            })?;
            headers.insert(
                HeaderName::from_static("digitransit-subscription-key"),
                value,
            );
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            timezone: config.timezone,
        })
    }

    /// The configured network timezone.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Execute one GraphQL query and unwrap its `data` payload.
    ///
    /// A non-success HTTP status and a GraphQL `errors` payload both map to
    /// the same upstream-failure outcome.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &'static str,
        variables: serde_json::Value,
    ) -> Result<T, DigitransitError> {
        let request = GraphQlRequest { query, variables };

        let response = self.http.post(&self.base_url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DigitransitError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: GraphQlResponse<T> =
            serde_json::from_str(&body).map_err(|e| DigitransitError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        if let Some(errors) = parsed.errors.filter(|e| !e.is_empty()) {
            let messages = errors
                .iter()
                .filter_map(|e| e.message.as_deref())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(DigitransitError::GraphQl { messages });
        }

        parsed.data.ok_or_else(|| DigitransitError::Json {
            message: "response carried neither data nor errors".to_string(),
            body: None,
        })
    }
}

impl TransitApi for DigitransitClient {
    async fn find_stops(&self, name: &str, limit: usize) -> Result<Vec<Stop>, DigitransitError> {
        let data: StopsData = self
            .execute(FIND_STOPS_QUERY, serde_json::json!({ "name": name }))
            .await?;

        // The stop search has no formal server-side limit; truncate here,
        // preserving the upstream's relevance order.
        let mut stops: Vec<Stop> = data
            .stops
            .unwrap_or_default()
            .into_iter()
            .map(stop_from_raw)
            .collect();
        stops.truncate(limit);

        Ok(stops)
    }

    async fn plan_itineraries(
        &self,
        origin: &StopId,
        destination: &StopId,
        arrive_by: NaiveDateTime,
        count: u32,
    ) -> Result<Vec<Itinerary>, DigitransitError> {
        let variables = serde_json::json!({
            "from": origin.as_str(),
            "to": destination.as_str(),
            "time": arrive_by.format(PLAN_TIME_FORMAT).to_string(),
            "arriveBy": true,
            "numItineraries": count,
        });

        let data: PlanData = self.execute(PLAN_JOURNEY_QUERY, variables).await?;

        let raw = data.plan.map(|p| p.itineraries).unwrap_or_default();

        let mut itineraries = Vec::with_capacity(raw.len());
        for value in &raw {
            match normalize_itinerary(value, self.timezone) {
                Ok(itinerary) => itineraries.push(itinerary),
                Err(e) => {
                    warn!(error = %e, "dropping itinerary that failed to normalize");
                }
            }
        }

        Ok(itineraries)
    }
}

fn stop_from_raw(raw: RawStop) -> Stop {
    Stop {
        id: StopId::new(raw.gtfs_id),
        name: raw.name,
        lat: raw.lat,
        lon: raw.lon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = DigitransitConfig::new();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.subscription_key.is_none());
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.timezone, chrono_tz::Europe::Helsinki);
    }

    #[test]
    fn config_builder() {
        let config = DigitransitConfig::new()
            .with_base_url("http://localhost:8080/graphql")
            .with_subscription_key("test-key")
            .with_timeout(5)
            .with_timezone(chrono_tz::Europe::London);

        assert_eq!(config.base_url, "http://localhost:8080/graphql");
        assert_eq!(config.subscription_key.as_deref(), Some("test-key"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.timezone, chrono_tz::Europe::London);
    }

    #[test]
    fn client_creation() {
        let client = DigitransitClient::new(DigitransitConfig::new());
        assert!(client.is_ok());
    }

    #[test]
    fn plan_time_rendering() {
        let arrive_by = chrono::NaiveDate::from_ymd_opt(2024, 12, 1)
            .unwrap()
            .and_hms_opt(8, 45, 0)
            .unwrap();
        assert_eq!(
            arrive_by.format(PLAN_TIME_FORMAT).to_string(),
            "2024-12-01T08:45:00"
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        // Port 9 (discard) is not listening; connection is refused
        // immediately, no network access required.
        let config = DigitransitConfig::new()
            .with_base_url("http://127.0.0.1:9/graphql")
            .with_timeout(1);
        let client = DigitransitClient::new(config).unwrap();

        let result = client.find_stops("Aalto", 10).await;
        assert!(matches!(result, Err(DigitransitError::Http(_))));
    }

    /// Serve exactly one canned HTTP response on a loopback listener and
    /// return the URL to point the client at.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 8192];
            let _ = socket.read(&mut buf).await;

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}/graphql")
    }

    async fn client_for(url: String) -> DigitransitClient {
        let config = DigitransitConfig::new().with_base_url(url).with_timeout(5);
        DigitransitClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn graphql_errors_payload_fails_despite_http_200() {
        let url = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"errors":[{"message":"Validation error of type FieldUndefined"}]}"#,
        )
        .await;
        let client = client_for(url).await;

        let result = client.find_stops("Aalto", 10).await;
        match result {
            Err(DigitransitError::GraphQl { messages }) => {
                assert!(messages.contains("FieldUndefined"));
            }
            other => panic!("expected GraphQl error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let url = serve_once(
            "HTTP/1.1 500 Internal Server Error",
            r#"{"error":"upstream exploded"}"#,
        )
        .await;
        let client = client_for(url).await;

        let result = client.find_stops("Aalto", 10).await;
        match result {
            Err(DigitransitError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("upstream exploded"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn stop_search_parses_and_truncates_over_the_wire() {
        let url = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"data":{"stops":[
                {"gtfsId":"HSL:1010101","name":"Aalto Yliopisto","lat":60.18456,"lon":24.82928},
                {"gtfsId":"HSL:1010102","name":"Aalto-yliopiston metroasema","lat":60.18445,"lon":24.82632}
            ]}}"#,
        )
        .await;
        let client = client_for(url).await;

        let stops = client.find_stops("Aalto", 1).await.unwrap();
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].id, StopId::new("HSL:1010101"));
        assert_eq!(stops[0].name, "Aalto Yliopisto");
    }

    #[tokio::test]
    async fn non_json_body_is_a_parse_error() {
        let url = serve_once("HTTP/1.1 200 OK", "<html>gateway timeout</html>").await;
        let client = client_for(url).await;

        let result = client.find_stops("Aalto", 10).await;
        assert!(matches!(result, Err(DigitransitError::Json { .. })));
    }
}
