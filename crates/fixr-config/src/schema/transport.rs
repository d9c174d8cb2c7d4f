//! HTTP transport timeouts.

use serde::{Deserialize, Serialize};

/// Timeouts applied to every outbound request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Whole-request timeout in seconds (valid range: 5-300).
    pub request_timeout: u32,
    /// TCP/TLS connect timeout in seconds (valid range: 1-60).
    pub connect_timeout: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: 30,
            connect_timeout: 10,
        }
    }
}
