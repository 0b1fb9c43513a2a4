//! `/tcpecho` passthrough handler.

use super::GatewayState;
use crate::downstream::fetch_text;
use axum::{extract::State, http::StatusCode};
use std::sync::Arc;

pub const ENDPOINT_NOT_SET_BODY: &str = "tcpecho endpoint is not set";

/// GET /tcpecho - Relay the echo server's answer.
///
/// Best effort: a failed or empty downstream answer yields an empty 200.
pub async fn handle(State(state): State<Arc<GatewayState>>) -> (StatusCode, String) {
    let Some(endpoint) = state.tcp_echo_endpoint.as_deref() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            ENDPOINT_NOT_SET_BODY.to_string(),
        );
    };

    tracing::info!(endpoint = %endpoint, "Calling tcp echo endpoint");
    match fetch_text(&state.http_client, endpoint).await {
        Ok(echo) => (
            StatusCode::OK,
            format!("Response from tcpecho server: {}", echo),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "tcp echo call failed");
            (StatusCode::OK, String::new())
        }
    }
}
