//! Conversation core for Fixr.
//!
//! Provides:
//! - the `Session` that owns a conversation log and sequences requests
//! - the `MessageTransport` seam to the AI backend, with an HTTP implementation
//! - image handles for uploads
//! - problem report submission with optional image analysis

pub mod http;
pub mod image;
pub mod problem;
pub mod session;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fixr_common::MessageId;

pub use http::{HttpTransport, HttpTransportConfig};
pub use image::{ImageHandle, ImageSource};
pub use problem::{submit_problem, ProblemError, ProblemReport, ServiceCategory, Urgency};
pub use session::{SendOutcome, Session, SessionEvent, SkipReason};

/// Capability for reaching the AI backend.
///
/// Implementations decode the backend's response once and hand back a
/// typed `TransportReply` or `TransportError`; callers never see raw JSON.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Send a text message within a thread (empty `thread_id` starts a new one).
    async fn post_text(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<TransportReply, TransportError>;

    /// Upload an image for analysis within a thread. `prompt` is optional
    /// text the backend reads alongside the image.
    async fn post_image(
        &self,
        thread_id: &str,
        image: Vec<u8>,
        filename: &str,
        prompt: Option<&str>,
    ) -> Result<TransportReply, TransportError>;
}

/// A successfully decoded backend response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportReply {
    pub thread_id: Option<String>,
    pub reply: Option<String>,
}

impl TransportReply {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            thread_id: None,
            reply: Some(reply.into()),
        }
    }

    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP {status}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Status { status: u16, detail: Option<String> },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout")]
    Timeout,
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Image read error: {0}")]
    Io(String),
    #[error("Transport panicked")]
    Panicked,
}

impl TransportError {
    /// Human-readable detail supplied by the backend, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            TransportError::Status {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }

    /// HTTP status code, when the backend answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// One entry in the conversation log.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
    pub kind: MessageKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// Rendering hint; carries no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Plain,
    Suggestion,
    Diagnosis,
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_only_for_status_with_text() {
        let err = TransportError::Status {
            status: 429,
            detail: Some("Rate limited".into()),
        };
        assert_eq!(err.detail(), Some("Rate limited"));
        assert_eq!(err.status_code(), Some(429));

        let err = TransportError::Status {
            status: 500,
            detail: Some(String::new()),
        };
        assert_eq!(err.detail(), None);

        assert_eq!(TransportError::Network("refused".into()).detail(), None);
        assert_eq!(TransportError::Timeout.detail(), None);
        assert_eq!(TransportError::Timeout.status_code(), None);
    }

    #[test]
    fn transport_error_display() {
        let err = TransportError::Status {
            status: 502,
            detail: Some("upstream down".into()),
        };
        assert_eq!(err.to_string(), "HTTP 502: upstream down");

        let err = TransportError::Status {
            status: 404,
            detail: None,
        };
        assert_eq!(err.to_string(), "HTTP 404");
        assert_eq!(TransportError::Timeout.to_string(), "Timeout");
    }

    #[test]
    fn message_serializes_with_snake_case_enums() {
        let msg = Message {
            id: MessageId::new(3),
            text: "Looks like a pipe joint failure".into(),
            sender: Sender::Assistant,
            created_at: Utc::now(),
            kind: MessageKind::Diagnosis,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["sender"], "assistant");
        assert_eq!(json["kind"], "diagnosis");
    }

    #[test]
    fn reply_builder() {
        let reply = TransportReply::new("hi").with_thread_id("abc123");
        assert_eq!(reply.reply.as_deref(), Some("hi"));
        assert_eq!(reply.thread_id.as_deref(), Some("abc123"));
    }
}
