//! On-disk persistence of the signed-in session.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::types::{AuthError, AuthSession};

const APP_NAME: &str = "fixr";
const CREDENTIALS_FILE: &str = "credentials.json";

/// Stores the last successful `AuthSession` as JSON.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store at `{data_dir}/fixr/credentials.json`.
    pub fn default_location() -> Result<Self, AuthError> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| AuthError::Store("could not determine data directory".into()))?;
        Ok(Self::at(data_dir.join(APP_NAME).join(CREDENTIALS_FILE)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session. A missing or unreadable file means
    /// nobody is signed in.
    pub fn load(&self) -> Option<AuthSession> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("failed to read {}: {e}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str(&data) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("ignoring corrupt credentials at {}: {e}", self.path.display());
                None
            }
        }
    }

    pub fn save(&self, session: &AuthSession) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AuthError::Store(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| AuthError::Store(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| {
            AuthError::Store(format!("failed to write {}: {e}", self.path.display()))
        })?;

        debug!("saved credentials to {}", self.path.display());
        Ok(())
    }

    /// Forget the stored session. Clearing an empty store is not an error.
    pub fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("signed out");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::Store(format!(
                "failed to remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}
