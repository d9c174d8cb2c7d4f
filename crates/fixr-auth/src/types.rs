//! Auth session types and errors.

use std::fmt;

use serde::{Deserialize, Serialize};

pub(crate) const NETWORK_ERROR_TEXT: &str = "Network error, please try again";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Network error, please try again")]
    Network(String),
    #[error("unexpected auth response: {0}")]
    Parse(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("credential store error: {0}")]
    Store(String),
}

impl AuthError {
    /// Text suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Network(_) => NETWORK_ERROR_TEXT.to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Token and profile returned by a successful register or login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}
