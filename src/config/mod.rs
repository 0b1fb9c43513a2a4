//! Configuration module for colorapp
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`SERVER_PORT`, `COLOR`, `STAGE`,
//!    `COLOR_TELLER_ENDPOINT`, `TCP_ECHO_ENDPOINT`, `COLORAPP_LOG_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! Empty environment variables count as unset.
//!
//! # Example
//!
//! ```rust
//! use colorapp::config::ColorAppConfig;
//!
//! let config = ColorAppConfig::default();
//! assert_eq!(config.server.port, 8080);
//!
//! let toml = r#"
//! stage = "prod"
//!
//! [gateway]
//! color_teller_endpoint = "colorteller:8080"
//! "#;
//! let config: ColorAppConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.stage, "prod");
//! ```

pub mod error;
pub mod gateway;
pub mod logging;
pub mod server;
pub mod teller;

pub use error::ConfigError;
pub use gateway::GatewayConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use teller::TellerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_STAGE: &str = "default";

/// Unified configuration for the gateway and the color teller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorAppConfig {
    /// Deployment stage, used to name request spans
    pub stage: String,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Gateway-only settings
    pub gateway: GatewayConfig,
    /// Color teller-only settings
    pub teller: TellerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for ColorAppConfig {
    fn default() -> Self {
        Self {
            stage: DEFAULT_STAGE.to_string(),
            server: ServerConfig::default(),
            gateway: GatewayConfig::default(),
            teller: TellerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Reads `name`, treating an empty value as unset.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl ColorAppConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(port) = env_var("SERVER_PORT") {
            if let Ok(p) = port.trim().parse() {
                self.server.port = p;
            }
        }
        if let Some(stage) = env_var("STAGE") {
            self.stage = stage;
        }

        if let Some(endpoint) = env_var(crate::downstream::COLOR_TELLER_ENDPOINT_VAR) {
            self.gateway.color_teller_endpoint = Some(endpoint);
        }
        if let Some(endpoint) = env_var(crate::downstream::TCP_ECHO_ENDPOINT_VAR) {
            self.gateway.tcp_echo_endpoint = Some(endpoint);
        }

        if let Some(color) = env_var("COLOR") {
            self.teller.color = color;
        }

        if let Some(level) = env_var("COLORAPP_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = env_var("COLORAPP_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    ///
    /// A missing color teller endpoint is not a validation error here: only
    /// the gateway needs it, and it refuses to start without one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "server.request_timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }
        if self.gateway.history_capacity == 0 {
            return Err(ConfigError::Validation {
                field: "gateway.history_capacity".to_string(),
                message: "capacity must be non-zero".to_string(),
            });
        }
        if self.teller.color.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "teller.color".to_string(),
                message: "color cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Span name for gateway requests, e.g. `default-gateway`.
    pub fn gateway_segment(&self) -> String {
        format!("{}-gateway", self.stage)
    }

    /// Span name for teller requests, e.g. `default-colorteller-black`.
    pub fn teller_segment(&self) -> String {
        format!("{}-colorteller-{}", self.stage, self.teller.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard, PoisonError};
    use tempfile::NamedTempFile;

    const ENV_VARS: [&str; 7] = [
        "SERVER_PORT",
        "STAGE",
        "COLOR_TELLER_ENDPOINT",
        "TCP_ECHO_ENDPOINT",
        "COLOR",
        "COLORAPP_LOG_LEVEL",
        "COLORAPP_LOG_FORMAT",
    ];

    // The process environment is shared between test threads.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> MutexGuard<'static, ()> {
        let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        clear_env();
        guard
    }

    fn clear_env() {
        for name in ENV_VARS {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = ColorAppConfig::default();
        assert_eq!(config.stage, "default");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.teller.color, "black");
        assert_eq!(config.gateway.history_capacity, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml = r#"
        [server]
        port = 9000
        "#;

        let config: ColorAppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.stage, "default");
    }

    #[test]
    fn test_config_parse_full_toml() {
        let toml = r#"
        stage = "staging"

        [server]
        host = "127.0.0.1"
        port = 9090
        request_timeout_seconds = 10

        [gateway]
        color_teller_endpoint = "colorteller.staging:8080"
        tcp_echo_endpoint = "tcpecho.staging:2701"
        history_capacity = 50
        ping_delay_ms = 100

        [teller]
        color = "blue"

        [logging]
        level = "debug"
        format = "json"
        "#;

        let config: ColorAppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.stage, "staging");
        assert_eq!(config.server.request_timeout_seconds, 10);
        assert_eq!(
            config.gateway.tcp_echo_endpoint.as_deref(),
            Some("tcpecho.staging:2701")
        );
        assert_eq!(config.teller.color, "blue");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.gateway_segment(), "staging-gateway");
        assert_eq!(config.teller_segment(), "staging-colorteller-blue");
    }

    #[test]
    fn test_load_none_returns_defaults() {
        let config = ColorAppConfig::load(None).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ColorAppConfig::load(Some(Path::new("/nonexistent/colorapp.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[teller]\ncolor = \"green\"").unwrap();

        let config = ColorAppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.teller.color, "green");
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        let result = ColorAppConfig::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = ColorAppConfig::default();
        config.server.port = 0;
        match config.validate() {
            Err(ConfigError::Validation { field, .. }) => assert_eq!(field, "server.port"),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut config = ColorAppConfig::default();
        config.gateway.history_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_color() {
        let mut config = ColorAppConfig::default();
        config.teller.color = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_allows_missing_endpoint() {
        let config = ColorAppConfig::default();
        assert!(config.gateway.color_teller_endpoint.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_all_fields() {
        let _guard = env_guard();
        std::env::set_var("SERVER_PORT", "9090");
        std::env::set_var("STAGE", "prod");
        std::env::set_var("COLOR_TELLER_ENDPOINT", "colorteller.local:8080");
        std::env::set_var("TCP_ECHO_ENDPOINT", "tcpecho.local:2701");
        std::env::set_var("COLOR", "green");
        std::env::set_var("COLORAPP_LOG_LEVEL", "debug");
        std::env::set_var("COLORAPP_LOG_FORMAT", "json");

        let config = ColorAppConfig::default().with_env_overrides();
        clear_env();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.stage, "prod");
        assert_eq!(
            config.gateway.color_teller_endpoint.as_deref(),
            Some("colorteller.local:8080")
        );
        assert_eq!(
            config.gateway.tcp_echo_endpoint.as_deref(),
            Some("tcpecho.local:2701")
        );
        assert_eq!(config.teller.color, "green");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.gateway_segment(), "prod-gateway");
    }

    #[test]
    fn test_env_overrides_ignore_invalid_values() {
        let _guard = env_guard();
        std::env::set_var("SERVER_PORT", "not-a-port");
        std::env::set_var("COLORAPP_LOG_FORMAT", "xml");

        let config = ColorAppConfig::default().with_env_overrides();
        clear_env();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_env_overrides_treat_empty_as_unset() {
        let _guard = env_guard();
        std::env::set_var("COLOR", "");
        std::env::set_var("STAGE", "   ");
        std::env::set_var("COLOR_TELLER_ENDPOINT", "");

        let config = ColorAppConfig::default().with_env_overrides();
        clear_env();

        assert_eq!(config.teller.color, "black");
        assert_eq!(config.stage, "default");
        assert!(config.gateway.color_teller_endpoint.is_none());
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let _guard = env_guard();
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[teller]\ncolor = \"red\"\n\n[server]\nport = 7000").unwrap();
        std::env::set_var("COLOR", "blue");

        let config = ColorAppConfig::load(Some(file.path()))
            .unwrap()
            .with_env_overrides();
        clear_env();

        assert_eq!(config.teller.color, "blue");
        assert_eq!(config.server.port, 7000);
    }
}
