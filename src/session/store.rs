//! One saved session file per role under the app home.

use super::{AuthSession, Role};
use crate::paths;
use anyhow::{Context, Result};

pub struct SessionStore;

impl SessionStore {
    pub fn save(session: &AuthSession) -> Result<()> {
        let path = paths::session_file_path(session.role.as_str())?;
        let content =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write session file: {}", path.display()))?;
        tracing::debug!(
            role = %session.role,
            token = %session.token_fingerprint(),
            "Session saved"
        );
        Ok(())
    }

    /// Loads the saved session for `role`, if any.
    ///
    /// A file that no longer parses is treated as no session.
    pub fn load(role: Role) -> Result<Option<AuthSession>> {
        let path = paths::session_file_path(role.as_str())?;
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;
        match serde_json::from_str::<AuthSession>(&content) {
            Ok(session) if session.role == role => Ok(Some(session)),
            Ok(session) => {
                tracing::warn!(
                    expected = %role,
                    found = %session.role,
                    "Session file holds another role; ignoring"
                );
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    /// Removes the saved session. Returns whether one existed.
    pub fn clear(role: Role) -> Result<bool> {
        let path = paths::session_file_path(role.as_str())?;
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to remove session file: {}", path.display()))?;
        tracing::info!(role = %role, "Session cleared");
        Ok(true)
    }

    /// Loads the session for `role` or explains how to create one.
    pub fn require(role: Role) -> Result<AuthSession> {
        Self::load(role)?.with_context(|| {
            format!(
                "Not logged in as {}. Run `collab login --role {} --token <token>` first.",
                role, role
            )
        })
    }
}
