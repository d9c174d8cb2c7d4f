//! HTTP client for the auth backend's register and login routes.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::types::{AuthError, AuthSession};

const REGISTER_PATH: &str = "api/auth/register";
const LOGIN_PATH: &str = "api/auth/login";

/// Auth backend client.
pub struct AuthClient {
    base_url: String,
    http: reqwest::Client,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeouts(base_url, Duration::from_secs(10), Duration::from_secs(30))
    }

    pub fn with_timeouts(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::builder()
                .connect_timeout(connect_timeout)
                .timeout(request_timeout)
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Create an account and return the new session.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        require("Name", name)?;
        require("Email", email)?;
        require("Password", password)?;

        let body = serde_json::json!({
            "name": name.trim(),
            "email": email.trim(),
            "password": password,
        });
        let session = self
            .post(REGISTER_PATH, &body, "Registration failed")
            .await?;
        info!(user = %session.user.email, "registered");
        Ok(session)
    }

    /// Sign in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        require("Email", email)?;
        require("Password", password)?;

        let body = serde_json::json!({
            "email": email.trim(),
            "password": password,
        });
        let session = self.post(LOGIN_PATH, &body, "Login failed").await?;
        info!(user = %session.user.email, "logged in");
        Ok(session)
    }

    async fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
        rejected_fallback: &str,
    ) -> Result<AuthSession, AuthError> {
        let url = self.endpoint(path);
        debug!(%url, "auth request");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!("auth request failed: {e}");
                AuthError::Network(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&text)
                    .unwrap_or_else(|| rejected_fallback.to_string()),
            });
        }

        serde_json::from_str(&text).map_err(|e| AuthError::Parse(e.to_string()))
    }
}

fn require(field: &str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}

/// The backend reports failures as `{"message": "..."}`.
fn rejection_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json.get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
}
