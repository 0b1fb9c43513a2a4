//! Outbound calls to the color teller (and other plain-text downstreams).
//!
//! A downstream is any HTTP endpoint that answers `GET` with a short text
//! body. The client issues exactly one request per call and never retries;
//! retry policy belongs to whoever calls the gateway.
//!
//! Cancellation follows the caller: the request future is owned by the axum
//! handler, so when the inbound connection goes away the handler future is
//! dropped and the in-flight `reqwest` call is aborted with it.

pub mod error;

pub use error::DownstreamError;

use std::time::Duration;

/// Environment variable naming the color teller endpoint.
pub const COLOR_TELLER_ENDPOINT_VAR: &str = "COLOR_TELLER_ENDPOINT";

/// Environment variable naming the optional TCP echo endpoint.
pub const TCP_ECHO_ENDPOINT_VAR: &str = "TCP_ECHO_ENDPOINT";

/// Builds the shared HTTP client used for every downstream call.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .build()
}

/// Turns `host:port` into `http://host:port`; full URLs pass through.
pub fn normalize_endpoint(endpoint: &str) -> String {
    let endpoint = endpoint.trim();
    if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    }
}

/// GETs `url` and returns the body with surrounding whitespace removed.
///
/// The status code is not inspected: whatever text comes back is the answer.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, DownstreamError> {
    let transport = |source| DownstreamError::Transport {
        endpoint: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(transport)?;
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    tracing::debug!(url = %url, status = status.as_u16(), bytes = body.len(), "Downstream responded");

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(DownstreamError::EmptyResponse {
            endpoint: url.to_string(),
            body,
        });
    }

    Ok(trimmed.to_string())
}

/// Client for the color teller service.
#[derive(Debug, Clone)]
pub struct ColorTellerClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ColorTellerClient {
    /// Creates a client for `endpoint`.
    ///
    /// Fails with [`DownstreamError::ConfigMissing`] when the endpoint is
    /// absent or blank; the gateway treats that as fatal at startup.
    pub fn new(http: reqwest::Client, endpoint: Option<&str>) -> Result<Self, DownstreamError> {
        match endpoint.map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => Ok(Self {
                http,
                endpoint: normalize_endpoint(endpoint),
            }),
            _ => Err(DownstreamError::ConfigMissing(COLOR_TELLER_ENDPOINT_VAR)),
        }
    }

    /// The resolved URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Asks the color teller for a color.
    pub async fn fetch_color(&self) -> Result<String, DownstreamError> {
        fetch_text(&self.http, &self.endpoint).await
    }
}
