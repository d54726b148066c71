//! Digitransit client error types.

/// Errors from the Digitransit GraphQL client.
///
/// These never cross the planner boundary: the planner logs them and
/// degrades to empty results.
#[derive(Debug, thiserror::Error)]
pub enum DigitransitError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response carried a GraphQL-level `errors` payload
    #[error("GraphQL query failed: {messages}")]
    GraphQl { messages: String },

    /// Failed to parse the response body
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },
}
