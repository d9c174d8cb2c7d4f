//! Plain-text rendering of conversation messages for the terminal.

use chrono::Local;
use fixr_ai::{Message, MessageKind, Sender};

pub fn sender_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "You",
        Sender::Assistant => "AI Assistant",
    }
}

fn kind_tag(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Plain => "",
        MessageKind::Suggestion => "[suggestion] ",
        MessageKind::Diagnosis => "[diagnosis] ",
        MessageKind::Warning => "[warning] ",
    }
}

/// `HH:MM Sender: [kind] text`, in local time.
pub fn format_message(message: &Message) -> String {
    format!(
        "{} {}: {}{}",
        message.created_at.with_timezone(&Local).format("%H:%M"),
        sender_label(message.sender),
        kind_tag(message.kind),
        message.text
    )
}
