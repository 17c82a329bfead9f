use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "COLLAB_API_URL";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollabConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub lists: ListsConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    pub base_url: String,
    /// Global per-request timeout. Default: 20
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

/// How list fetches that are not needed for the current step behave on failure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListsConfig {
    /// Bids, scripts and content fall back to an empty list instead of
    /// failing the whole refresh. Default: true
    #[serde(default = "default_degrade_on_error")]
    pub degrade_on_error: bool,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            degrade_on_error: default_degrade_on_error(),
        }
    }
}

fn default_degrade_on_error() -> bool {
    true
}

impl CollabConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file as YAML: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration embedded from `collab.yaml`.
    pub fn default_config() -> Result<Self> {
        const DEFAULT_COLLAB_YAML: &str = include_str!("../collab.yaml");
        serde_yaml::from_str(DEFAULT_COLLAB_YAML).context("Failed to parse embedded collab.yaml")
    }

    /// Picks the explicit path, else the user file if present, else the
    /// embedded default, then applies the environment override.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let user_path = crate::paths::config_path()?;
                if user_path.exists() {
                    Self::load(&user_path)?
                } else {
                    Self::default_config()?
                }
            }
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::debug!("Using backend URL from {}", API_URL_ENV);
                config.api.base_url = url.trim().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            anyhow::bail!("api.base_url must not be empty");
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!(
                "api.base_url must start with http:// or https:// (got '{}')",
                base_url
            );
        }

        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be greater than zero");
        }

        if self.display.currency_symbol.trim().is_empty() {
            anyhow::bail!("display.currency_symbol must not be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
