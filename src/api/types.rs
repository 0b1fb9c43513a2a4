//! Response envelopes for the gateway.

use crate::history::ColorRatios;
use serde::Serialize;

/// Body of a successful `GET /color`.
///
/// `Degraded` is used when the statistics cannot be encoded; the fetched
/// color is still reported and has already been recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorEnvelope {
    Stats {
        color: String,
        stats: serde_json::Value,
    },
    Degraded {
        color: String,
        error: String,
    },
}

impl ColorEnvelope {
    /// Encodes `ratios`, falling back to the degraded form on failure.
    pub fn new(color: String, ratios: &ColorRatios) -> Self {
        match serde_json::to_value(ratios) {
            Ok(stats) => ColorEnvelope::Stats { color, stats },
            // Not reachable for f64 values: serde_json encodes non-finite floats as null.
            Err(e) => {
                tracing::warn!(error = %e, color = %color, "Failed to encode color stats");
                ColorEnvelope::Degraded {
                    color,
                    error: e.to_string(),
                }
            }
        }
    }

    pub fn color(&self) -> &str {
        match self {
            ColorEnvelope::Stats { color, .. } | ColorEnvelope::Degraded { color, .. } => color,
        }
    }
}
