//! Where the config file lives, and writing the first-run template.

use std::path::{Path, PathBuf};

use fixr_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

/// Points the CLI at a config file outside the platform config directory.
pub const CONFIG_PATH_ENV: &str = "FIXR_CONFIG";

const APP_DIR: &str = "fixr";
const CONFIG_FILE: &str = "config.toml";

/// `$FIXR_CONFIG` if set, otherwise `{config_dir}/fixr/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    resolve_config_path(|key| std::env::var(key).ok(), dirs::config_dir())
}

pub(crate) fn resolve_config_path(
    lookup: impl Fn(&str) -> Option<String>,
    config_dir: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = lookup(CONFIG_PATH_ENV).filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path.trim()));
    }
    let dir = config_dir.ok_or_else(|| {
        ConfigError::ParseError(format!(
            "no platform config directory; set {CONFIG_PATH_ENV}"
        ))
    })?;
    Ok(dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Write the commented template to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |what: &str, target: &Path, e: std::io::Error| {
        ConfigError::ParseError(format!("cannot {what} {}: {e}", target.display()))
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| write_err("create", parent, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| write_err("write", path, e))?;

    info!(path = %path.display(), "wrote starter config");
    Ok(())
}
