//! `/color` and `/color/clear` handlers.

use super::error::GatewayError;
use super::types::ColorEnvelope;
use super::GatewayState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Body returned once the history has been cleared.
pub const CLEARED_BODY: &str = "cleared";

/// GET /color - Fetch a color, record it and report the rolling stats.
///
/// The color is appended before the stats are encoded, so it counts toward
/// the history even if the envelope ends up degraded.
pub async fn handle(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<ColorEnvelope>, GatewayError> {
    let color = state.color_teller.fetch_color().await?;
    let ratios = state.history.record(&color);
    let envelope = ColorEnvelope::new(color, &ratios);
    tracing::debug!(color = %envelope.color(), distinct = ratios.len(), "Recorded color");
    Ok(Json(envelope))
}

/// GET /color/clear - Reset the color history.
pub async fn clear(State(state): State<Arc<GatewayState>>) -> &'static str {
    state.history.clear();
    tracing::info!("Color history cleared");
    CLEARED_BODY
}
