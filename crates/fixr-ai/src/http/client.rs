//! HTTP transport struct and endpoint resolution.

use tracing::debug;

use crate::TransportError;

use super::config::HttpTransportConfig;

pub(crate) const CHAT_PATH: &str = "send-message-gpt";
pub(crate) const IMAGE_PATH: &str = "analyze-image/";

/// `MessageTransport` backed by the AI backend's HTTP API.
pub struct HttpTransport {
    pub(crate) config: HttpTransportConfig,
    pub(crate) http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> Self {
        debug!(base_url = %config.base_url, "building HTTP transport");
        Self {
            http: reqwest::Client::builder()
                .connect_timeout(config.connect_timeout)
                .timeout(config.request_timeout)
                .build()
                .expect("failed to build HTTP client"),
            config,
        }
    }

    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    /// Join the base URL and an endpoint path with exactly one slash.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Map a `reqwest` send/read failure onto the transport taxonomy.
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_decode() {
        TransportError::Decode(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}
