//! Fixr configuration system.
//!
//! TOML-based configuration with environment overrides and validation.
//! All sections use defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fixr_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod dotenv;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{FixrConfig, LogLevel, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use fixr_common::ConfigError;

/// Load config from the platform default path.
///
/// Creates a default `config.toml` if none exists, applies environment
/// overrides, and validates the result.
pub fn load_config() -> Result<FixrConfig, ConfigError> {
    let mut config = toml_loader::load_default()?;
    toml_loader::apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path, with environment overrides and validation.
pub fn load_config_from(path: &Path) -> Result<FixrConfig, ConfigError> {
    let mut config = toml_loader::load_from_path(path)?;
    toml_loader::apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &FixrConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
