//! Decoding of backend response bodies into typed replies.

use serde::Deserialize;

use crate::{TransportError, TransportReply};

/// Body of a chat reply: `{"threadID": "...", "message2": "..."}`.
#[derive(Debug, Default, Deserialize)]
struct ChatBody {
    #[serde(rename = "threadID", default)]
    thread_id: Option<String>,
    #[serde(default)]
    message2: Option<String>,
}

/// Body of an image analysis reply. The chat-shaped result is usually
/// nested under `gemini_result`; some deployments return it flat.
#[derive(Debug, Deserialize)]
struct ImageBody {
    #[serde(default)]
    gemini_result: Option<ChatBody>,
    #[serde(default)]
    analysis: Option<String>,
    #[serde(flatten)]
    flat: ChatBody,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub(crate) fn decode_text_reply(body: &[u8]) -> Result<TransportReply, TransportError> {
    let parsed: ChatBody =
        serde_json::from_slice(body).map_err(|e| TransportError::Decode(e.to_string()))?;
    Ok(TransportReply {
        thread_id: non_empty(parsed.thread_id),
        reply: non_empty(parsed.message2),
    })
}

pub(crate) fn decode_image_reply(body: &[u8]) -> Result<TransportReply, TransportError> {
    let parsed: ImageBody =
        serde_json::from_slice(body).map_err(|e| TransportError::Decode(e.to_string()))?;
    let result = parsed.gemini_result.unwrap_or(parsed.flat);
    Ok(TransportReply {
        thread_id: non_empty(result.thread_id),
        reply: non_empty(result.message2).or_else(|| non_empty(parsed.analysis)),
    })
}

/// Pull a human-readable detail out of an error body, if it has one.
///
/// Looks at `detail` first, then `message`. Non-JSON bodies and
/// non-string fields yield `None`.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "message"]
        .iter()
        .find_map(|key| json.get(key).and_then(|v| v.as_str()))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_reply_with_thread() {
        let reply =
            decode_text_reply(br#"{"threadID": "abc123", "message2": "Turn off the water supply..."}"#)
                .unwrap();
        assert_eq!(reply.thread_id.as_deref(), Some("abc123"));
        assert_eq!(reply.reply.as_deref(), Some("Turn off the water supply..."));
    }

    #[test]
    fn text_reply_missing_fields() {
        let reply = decode_text_reply(b"{}").unwrap();
        assert_eq!(reply, TransportReply::default());
    }

    #[test]
    fn text_reply_empty_strings_are_absent() {
        let reply = decode_text_reply(br#"{"threadID": "", "message2": ""}"#).unwrap();
        assert_eq!(reply.thread_id, None);
        assert_eq!(reply.reply, None);
    }

    #[test]
    fn text_reply_null_thread() {
        let reply = decode_text_reply(br#"{"threadID": null, "message2": "ok"}"#).unwrap();
        assert_eq!(reply.thread_id, None);
        assert_eq!(reply.reply.as_deref(), Some("ok"));
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = decode_text_reply(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn image_reply_nested_result() {
        let reply = decode_image_reply(
            br#"{"analysis": "raw", "gemini_result": {"threadID": "t-9", "message2": "Looks like a pipe joint failure"}}"#,
        )
        .unwrap();
        assert_eq!(reply.thread_id.as_deref(), Some("t-9"));
        assert_eq!(reply.reply.as_deref(), Some("Looks like a pipe joint failure"));
    }

    #[test]
    fn image_reply_without_thread_id() {
        let reply =
            decode_image_reply(br#"{"gemini_result": {"message2": "Looks like a pipe joint failure"}}"#)
                .unwrap();
        assert_eq!(reply.thread_id, None);
        assert_eq!(reply.reply.as_deref(), Some("Looks like a pipe joint failure"));
    }

    #[test]
    fn image_reply_flat_shape() {
        let reply = decode_image_reply(br#"{"threadID": "flat", "message2": "Cracked trap"}"#).unwrap();
        assert_eq!(reply.thread_id.as_deref(), Some("flat"));
        assert_eq!(reply.reply.as_deref(), Some("Cracked trap"));
    }

    #[test]
    fn image_reply_falls_back_to_analysis() {
        let reply = decode_image_reply(br#"{"analysis": "Corroded fitting", "gemini_result": {}}"#)
            .unwrap();
        assert_eq!(reply.reply.as_deref(), Some("Corroded fitting"));
    }

    #[test]
    fn error_detail_prefers_detail_field() {
        assert_eq!(
            error_detail(r#"{"detail": "Rate limited", "message": "other"}"#).as_deref(),
            Some("Rate limited")
        );
        assert_eq!(
            error_detail(r#"{"message": "Bad image"}"#).as_deref(),
            Some("Bad image")
        );
    }

    #[test]
    fn error_detail_absent_cases() {
        assert_eq!(error_detail("Internal Server Error"), None);
        assert_eq!(error_detail(r#"{"detail": [{"loc": ["body"]}]}"#), None);
        assert_eq!(error_detail(r#"{"detail": "  "}"#), None);
        assert_eq!(error_detail(""), None);
    }
}
