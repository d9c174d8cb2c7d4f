//! Reading `config.toml` into a `FixrConfig`.

use std::io::ErrorKind;
use std::path::Path;

use fixr_common::ConfigError;
use tracing::{info, warn};

use crate::schema::FixrConfig;
use crate::validation;

use super::paths::{create_default_config, default_config_path};
use super::template::default_config_toml;

/// Read and parse the file at `path`.
///
/// Absent sections and keys take their defaults. Out-of-range values are
/// reported with a warning here; callers that need a usable config run
/// `validation::validate` themselves.
pub fn load_from_path(path: &Path) -> Result<FixrConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "cannot read {}: {e}",
                path.display()
            )))
        }
    };

    let config = parse_config(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

pub(crate) fn parse_config(content: &str) -> Result<FixrConfig, toml::de::Error> {
    let config: FixrConfig = toml::from_str(content)?;
    if let Err(e) = validation::validate(&config) {
        warn!("config has invalid values: {e}");
    }
    Ok(config)
}

/// Load from [`default_config_path`], writing the starter template on first run.
pub fn load_default() -> Result<FixrConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            create_default_config(&path)?;
            parse_config(&default_config_toml())
                .map_err(|e| ConfigError::ParseError(format!("starter template: {e}")))
        }
        other => other,
    }
}
