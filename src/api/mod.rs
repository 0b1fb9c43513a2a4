//! # Gateway API
//!
//! HTTP surface of the gateway that sits in front of the color teller.
//!
//! ## Endpoints
//!
//! - `GET /color` - Fetch a color from the teller, record it, return rolling stats
//! - `GET /color/clear` - Reset the color history
//! - `GET /ping` - Delayed liveness answer (5s by default)
//! - `GET /retry` - Random 500 for roughly half of the calls
//! - `GET /tcpecho` - Best-effort passthrough to the echo server
//!
//! ## Example
//!
//! ```no_run
//! use colorapp::api::{create_router, GatewayState};
//! use colorapp::config::ColorAppConfig;
//! use colorapp::history::ColorHistory;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = ColorAppConfig::default();
//! config.gateway.color_teller_endpoint = Some("colorteller:8080".to_string());
//!
//! let history = Arc::new(ColorHistory::new(config.gateway.history_capacity));
//! let state = Arc::new(GatewayState::from_config(&config, history)?);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Any failure talking to the color teller becomes a 500 with the fixed body
//! `500 - Unexpected Error`; the cause only shows up in the logs.

mod color;
pub mod error;
pub mod faults;
mod tcpecho;
pub mod types;

pub use color::CLEARED_BODY;
pub use error::{GatewayError, UNEXPECTED_ERROR_BODY};
pub use tcpecho::ENDPOINT_NOT_SET_BODY;
pub use types::ColorEnvelope;

use crate::config::ColorAppConfig;
use crate::downstream::{
    build_http_client, normalize_endpoint, ColorTellerClient, DownstreamError,
};
use crate::faults::FaultInjector;
use crate::history::ColorHistory;
use crate::logging::request_span;
use axum::{body::Body, extract::State, http::StatusCode, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Every endpoint is a GET; bodies are never read.
const MAX_BODY_SIZE: usize = 64 * 1024;

/// Shared gateway state accessible to all handlers.
pub struct GatewayState {
    pub history: Arc<ColorHistory>,
    pub color_teller: ColorTellerClient,
    /// Normalized URL of the echo server, if configured
    pub tcp_echo_endpoint: Option<String>,
    pub http_client: reqwest::Client,
    pub faults: FaultInjector,
    pub ping_delay: Duration,
    /// Bound on `/color` and `/tcpecho`; `/ping` is not subject to it
    pub request_timeout: Duration,
    /// Name attached to every request span
    pub segment: String,
}

impl GatewayState {
    /// Create state around an existing client and history.
    pub fn new(
        color_teller: ColorTellerClient,
        http_client: reqwest::Client,
        history: Arc<ColorHistory>,
    ) -> Self {
        let defaults = ColorAppConfig::default();
        Self {
            history,
            color_teller,
            tcp_echo_endpoint: None,
            http_client,
            faults: FaultInjector::new(),
            ping_delay: Duration::from_millis(defaults.gateway.ping_delay_ms),
            request_timeout: Duration::from_secs(defaults.server.request_timeout_seconds),
            segment: defaults.gateway_segment(),
        }
    }

    /// Build state from configuration.
    ///
    /// Fails with [`DownstreamError::ConfigMissing`] when no color teller
    /// endpoint is configured.
    pub fn from_config(
        config: &ColorAppConfig,
        history: Arc<ColorHistory>,
    ) -> Result<Self, DownstreamError> {
        let request_timeout = Duration::from_secs(config.server.request_timeout_seconds);
        let http_client =
            build_http_client(request_timeout).map_err(DownstreamError::HttpClient)?;
        let color_teller = ColorTellerClient::new(
            http_client.clone(),
            config.gateway.color_teller_endpoint.as_deref(),
        )?;

        Ok(Self::new(color_teller, http_client, history)
            .with_tcp_echo_endpoint(config.gateway.tcp_echo_endpoint.as_deref())
            .with_ping_delay(Duration::from_millis(config.gateway.ping_delay_ms))
            .with_request_timeout(request_timeout)
            .with_segment(config.gateway_segment()))
    }

    pub fn with_tcp_echo_endpoint(mut self, endpoint: Option<&str>) -> Self {
        self.tcp_echo_endpoint = endpoint
            .filter(|e| !e.trim().is_empty())
            .map(normalize_endpoint);
        self
    }

    pub fn with_faults(mut self, faults: FaultInjector) -> Self {
        self.faults = faults;
        self
    }

    pub fn with_ping_delay(mut self, delay: Duration) -> Self {
        self.ping_delay = delay;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_segment(mut self, segment: String) -> Self {
        self.segment = segment;
        self
    }
}

/// GET /ping
async fn ping(State(state): State<Arc<GatewayState>>) -> &'static str {
    faults::delayed_ping(state.ping_delay).await
}

/// GET /retry
async fn retry(State(state): State<Arc<GatewayState>>) -> (StatusCode, &'static str) {
    faults::random_fault(&state.faults)
}

/// Create the gateway router with all endpoints configured.
pub fn create_router(state: Arc<GatewayState>) -> Router {
    let segment = state.segment.clone();
    let timeout = state.request_timeout;

    // Only routes that call a downstream are bounded by the request timeout.
    let downstream = Router::new()
        .route("/color", get(color::handle))
        .route("/tcpecho", get(tcpecho::handle))
        .route_layer(TimeoutLayer::new(timeout));

    Router::new()
        .merge(downstream)
        .route("/color/clear", get(color::clear))
        .route("/ping", get(ping))
        .route("/retry", get(retry))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>(segment)))
        .with_state(state)
}
