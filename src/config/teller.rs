//! Color teller service configuration

use serde::{Deserialize, Serialize};

pub const DEFAULT_COLOR: &str = "black";

/// Settings for the color teller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TellerConfig {
    /// The color this teller answers with.
    pub color: String,
}

impl Default for TellerConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
        }
    }
}
