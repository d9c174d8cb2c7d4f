//! Environment variable overrides applied on top of the file config.

use tracing::debug;

use crate::schema::FixrConfig;

pub const AI_URL_ENV: &str = "FIXR_AI_API_URL";
pub const AUTH_URL_ENV: &str = "FIXR_API_URL";

/// Override endpoint URLs from the process environment.
pub fn apply_env_overrides(config: &mut FixrConfig) {
    apply_with(config, |key| std::env::var(key).ok());
}

pub(crate) fn apply_with(config: &mut FixrConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(AI_URL_ENV).filter(|v| !v.trim().is_empty()) {
        debug!("{AI_URL_ENV} overrides api.ai_url");
        config.api.ai_url = url.trim().to_string();
    }
    if let Some(url) = lookup(AUTH_URL_ENV).filter(|v| !v.trim().is_empty()) {
        debug!("{AUTH_URL_ENV} overrides api.auth_url");
        config.api.auth_url = url.trim().to_string();
    }
}
