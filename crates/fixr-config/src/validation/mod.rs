//! Full configuration validation.
//!
//! Collects every problem into a single `ConfigError` so a user fixing
//! their config sees all of them at once.

mod helpers;


use crate::schema::FixrConfig;
use fixr_common::ConfigError;

use helpers::{validate_http_url, validate_range};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &FixrConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_http_url(&mut errors, "api.ai_url", &config.api.ai_url);
    validate_http_url(&mut errors, "api.auth_url", &config.api.auth_url);

    validate_range(
        &mut errors,
        "transport.request_timeout",
        config.transport.request_timeout,
        5,
        300,
    );
    validate_range(
        &mut errors,
        "transport.connect_timeout",
        config.transport.connect_timeout,
        1,
        60,
    );

    if config.chat.greeting.trim().is_empty() {
        errors.push("chat.greeting must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
