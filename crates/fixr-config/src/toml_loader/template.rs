//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Fixr Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# FIXR_AI_API_URL and FIXR_API_URL override the [api] URLs.

[api]
# ai_url = "http://127.0.0.1:8000"
# auth_url = "http://localhost:5012"

[transport]
# request_timeout = 30   # 5-300 seconds
# connect_timeout = 10   # 1-60 seconds

[chat]
# greeting = "Hello! I'm your AI assistant. ..."

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
    .to_string()
}
