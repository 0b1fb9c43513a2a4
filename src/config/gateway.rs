//! Gateway service configuration

use crate::history::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};

/// Settings for the gateway in front of the color teller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// `host:port` or URL of the color teller. Required to serve `/color`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_teller_endpoint: Option<String>,
    /// `host:port` or URL of the echo server behind `/tcpecho`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_echo_endpoint: Option<String>,
    /// Number of colors kept for statistics.
    pub history_capacity: usize,
    /// How long `/ping` waits before answering.
    pub ping_delay_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            color_teller_endpoint: None,
            tcp_echo_endpoint: None,
            history_capacity: DEFAULT_CAPACITY,
            ping_delay_ms: 5000,
        }
    }
}
