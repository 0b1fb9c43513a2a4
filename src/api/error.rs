//! Error handling at the gateway's HTTP boundary.

use crate::downstream::DownstreamError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Fixed body for any failure talking to the color teller.
pub const UNEXPECTED_ERROR_BODY: &str = "500 - Unexpected Error";

/// Per-request failures surfaced by gateway handlers.
///
/// The underlying cause is logged; clients only see a fixed body.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("color teller call failed: {0}")]
    ColorTeller(#[from] DownstreamError),
}

impl GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::ColorTeller(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match &self {
            GatewayError::ColorTeller(e) if !e.is_runtime() => {
                tracing::error!(error = %self, "Responding with 500, gateway is misconfigured")
            }
            _ => tracing::warn!(error = %self, "Responding with 500"),
        }
        (self.status_code(), UNEXPECTED_ERROR_BODY).into_response()
    }
}
