// src/config.rs
// =============================================================================
// Runtime configuration.
//
// Values come from three places, later ones winning:
// 1. Built-in defaults
// 2. A TOML config file (optional)
// 3. Command-line flags / environment variables
//
// Example config file:
//
//   base_url = "https://raw.githubusercontent.com"
//   timeout_secs = 10
//   default_branch = "main"
//   theme = "base16-ocean.dark"
// =============================================================================

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::render::DEFAULT_THEME;

pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Raw-content host; files are fetched from <base_url>/<repo>/<branch>/<file>
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Branch used by the hook syntax when none is given
    pub default_branch: String,
    /// syntect theme for inline highlighting styles
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            default_branch: "master".to_string(),
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl Config {
    // Loads the config file if one was given, otherwise the defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        self
    }

    // Checks the base URL and strips trailing slashes
    //
    // Only the base is checked. Repo, branch and file are joined onto it
    // as-is later on.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::BaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let parsed = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }

        let trimmed = self.base_url.trim_end_matches('/').to_string();
        self.base_url = trimmed;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
