//! Centralized home-based storage paths for campaign-collab persistence.
//!
//! Everything lives under `~/.campaign-collab/` (or `$COLLAB_HOME`):
//! - `config.yaml` - Optional user configuration
//! - `sessions/<role>.json` - Saved auth session per role
//! - `logs/<session-id>/events.jsonl` - Structured audit log
//!
//! Campaign data itself is never written here; it is refetched every run.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;

/// The name of the app directory under the user's home.
const COLLAB_DIR: &str = ".campaign-collab";

/// Environment variable that relocates the app directory.
pub const COLLAB_HOME_ENV: &str = "COLLAB_HOME";

#[cfg(test)]
static HOME_OVERRIDE: std::sync::Mutex<Option<PathBuf>> = std::sync::Mutex::new(None);

/// Points the app directory at `path` until the guard drops.
///
/// Tests using this must be `#[serial]`.
#[cfg(test)]
pub fn set_home_for_test(path: &std::path::Path) -> TestHomeGuard {
    if let Ok(mut slot) = HOME_OVERRIDE.lock() {
        *slot = Some(path.to_path_buf());
    }
    TestHomeGuard
}

#[cfg(test)]
pub struct TestHomeGuard;

#[cfg(test)]
impl Drop for TestHomeGuard {
    fn drop(&mut self) {
        if let Ok(mut slot) = HOME_OVERRIDE.lock() {
            *slot = None;
        }
    }
}

fn resolve_home() -> Result<PathBuf> {
    #[cfg(test)]
    if let Some(path) = HOME_OVERRIDE.lock().ok().and_then(|slot| slot.clone()) {
        return Ok(path);
    }

    if let Some(dir) = std::env::var_os(COLLAB_HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let home = dirs::home_dir().context("Could not determine home directory for app storage")?;
    Ok(home.join(COLLAB_DIR))
}

/// Returns the app directory: `~/.campaign-collab/`
///
/// Creates the directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if:
/// - Home directory cannot be determined
/// - Directory creation fails
pub fn collab_home_dir() -> Result<PathBuf> {
    let dir = resolve_home()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create app directory: {}", dir.display()))?;
    Ok(dir)
}

/// Returns the user config path: `~/.campaign-collab/config.yaml`
///
/// The file is optional; callers check for existence.
pub fn config_path() -> Result<PathBuf> {
    Ok(collab_home_dir()?.join("config.yaml"))
}

/// Returns the sessions directory: `~/.campaign-collab/sessions/`
///
/// Creates the directory if it doesn't exist.
pub fn sessions_dir() -> Result<PathBuf> {
    let dir = collab_home_dir()?.join("sessions");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create sessions directory: {}", dir.display()))?;
    Ok(dir)
}

/// Returns the saved session file for a role: `~/.campaign-collab/sessions/<role>.json`
pub fn session_file_path(role: &str) -> Result<PathBuf> {
    Ok(sessions_dir()?.join(format!("{}.json", role)))
}

/// Returns the logs directory for a session: `~/.campaign-collab/logs/<session-id>/`
///
/// Creates the directory if it doesn't exist.
pub fn session_logs_dir(session_id: &str) -> Result<PathBuf> {
    let dir = collab_home_dir()?.join("logs").join(session_id);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create logs directory: {}", dir.display()))?;
    Ok(dir)
}

/// Short SHA256 fingerprint (12 hex characters) for logging secrets by identity.
pub fn fingerprint(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    hex_encode(&result[..6])
}

/// Encodes bytes as lowercase hex string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
#[path = "tests/paths_tests.rs"]
mod tests;
