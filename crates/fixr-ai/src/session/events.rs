//! Change notifications for whoever renders the session.

use serde::{Deserialize, Serialize};

use crate::Message;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SessionEvent {
    MessageAppended(Message),
    PendingChanged(bool),
    ThreadChanged(String),
}
