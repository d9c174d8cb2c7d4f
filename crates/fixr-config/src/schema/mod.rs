//! Configuration schema types for Fixr.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod api;
mod chat;
mod logging;
mod transport;

pub use api::*;
pub use chat::*;
pub use logging::*;
pub use transport::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Fixr.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FixrConfig {
    pub api: ApiConfig,
    pub transport: TransportConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_endpoints() {
        let config = FixrConfig::default();
        assert_eq!(config.api.ai_url, "http://127.0.0.1:8000");
        assert_eq!(config.api.auth_url, "http://localhost:5012");
    }

    #[test]
    fn default_config_timeouts() {
        let config = FixrConfig::default();
        assert_eq!(config.transport.request_timeout, 30);
        assert_eq!(config.transport.connect_timeout, 10);
    }

    #[test]
    fn default_config_greeting_and_logging() {
        let config = FixrConfig::default();
        assert!(config.chat.greeting.starts_with("Hello! I'm your AI assistant."));
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: FixrConfig = toml::from_str(
            r#"
[transport]
request_timeout = 60
"#,
        )
        .unwrap();
        assert_eq!(config.transport.request_timeout, 60);
        assert_eq!(config.transport.connect_timeout, 10);
        assert_eq!(config.api.ai_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn log_level_parses_lowercase() {
        let config: FixrConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.level.as_directive(), "debug");
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let result: Result<FixrConfig, _> = toml::from_str("[logging]\nlevel = \"loud\"\n");
        assert!(result.is_err());
    }
}
