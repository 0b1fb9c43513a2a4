//! Color teller service
//!
//! The stateless downstream the gateway asks for colors. It answers every
//! request with the single color it was configured with.
//!
//! ## Endpoints
//!
//! - `GET /` (and any unmatched path) - The configured color as plain text
//! - `GET /ping` - 200 with an empty body
//! - `GET /retryTest` - Random 500 for roughly half of the calls

use crate::api::faults;
use crate::config::ColorAppConfig;
use crate::faults::FaultInjector;
use crate::logging::request_span;
use axum::{body::Body, extract::State, http::StatusCode, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared teller state.
pub struct TellerState {
    pub color: String,
    pub faults: FaultInjector,
    pub segment: String,
}

impl TellerState {
    pub fn new(color: impl Into<String>) -> Self {
        let color = color.into();
        Self {
            segment: format!("{}-colorteller-{}", crate::config::DEFAULT_STAGE, color),
            color,
            faults: FaultInjector::new(),
        }
    }

    pub fn from_config(config: &ColorAppConfig) -> Self {
        Self::new(config.teller.color.clone()).with_segment(config.teller_segment())
    }

    pub fn with_faults(mut self, faults: FaultInjector) -> Self {
        self.faults = faults;
        self
    }

    pub fn with_segment(mut self, segment: String) -> Self {
        self.segment = segment;
        self
    }
}

/// GET / - Tell the caller our color.
async fn color(State(state): State<Arc<TellerState>>) -> String {
    tracing::info!(color = %state.color, "Color requested");
    state.color.clone()
}

/// GET /retryTest
async fn retry_test(State(state): State<Arc<TellerState>>) -> (StatusCode, &'static str) {
    faults::random_fault(&state.faults)
}

/// Create the color teller router.
pub fn create_router(state: Arc<TellerState>) -> Router {
    let segment = state.segment.clone();

    Router::new()
        .route("/", get(color))
        .route("/ping", get(faults::simple_ping))
        .route("/retryTest", get(retry_test))
        .fallback(color)
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>(segment)))
        .with_state(state)
}
