//! Conversation settings.

use serde::{Deserialize, Serialize};

pub const DEFAULT_GREETING: &str = "Hello! I'm your AI assistant. I can help diagnose problems, \
provide repair guidance, and connect you with the right professionals. How can I help you today?";

/// Conversation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// First assistant message shown in every new conversation.
    pub greeting: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.into(),
        }
    }
}
