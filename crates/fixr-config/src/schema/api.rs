//! Backend endpoint configuration.

use serde::{Deserialize, Serialize};

/// Base URLs of the two backends the client talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// AI backend serving `/send-message-gpt` and `/analyze-image/`.
    pub ai_url: String,
    /// Auth backend serving `/api/auth/register` and `/api/auth/login`.
    pub auth_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            ai_url: "http://127.0.0.1:8000".into(),
            auth_url: "http://localhost:5012".into(),
        }
    }
}
