//! Emotion service configuration.
//!
//! The only configurable inputs are the API origin and the request timeout.
//! They are stored as TOML:
//! - Linux: `~/.config/moodlens/client.toml`
//! - Windows: `%APPDATA%/moodlens/client.toml`
//!
//! `MOODLENS_API_ORIGIN` overrides the stored origin.

use std::path::{Path, PathBuf};
use std::time::Duration;

use moodlens_protocol::constants::{DEFAULT_API_ORIGIN, DEFAULT_REQUEST_TIMEOUT};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides [`ServiceConfig::base_url`].
pub const API_ORIGIN_ENV: &str = "MOODLENS_API_ORIGIN";

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid API origin {origin:?}: {reason}")]
    InvalidOrigin { origin: String, reason: String },
}

/// Connection settings for the emotion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// API origin, e.g. `http://localhost:8000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_ORIGIN.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServiceConfig {
    /// Config pointing at `base_url` with the default timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Loads from the platform config file, then applies the environment
    /// override.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::load_from(&config_path())?;
        config.apply_origin_override(std::env::var(API_ORIGIN_ENV).ok())
    }

    /// Loads configuration from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ServiceConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Replaces the origin when `origin` is a non-empty value.
    pub fn apply_origin_override(mut self, origin: Option<String>) -> Result<Self, ConfigError> {
        if let Some(origin) = origin.filter(|o| !o.trim().is_empty()) {
            tracing::debug!(origin = %origin, "API origin overridden from environment");
            self.base_url = origin.trim().to_string();
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks that the origin is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidOrigin {
            origin: self.base_url.clone(),
            reason,
        };
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }

    /// Request timeout as a [`Duration`]. Zero falls back to the default.
    pub fn request_timeout(&self) -> Duration {
        if self.request_timeout_secs == 0 {
            DEFAULT_REQUEST_TIMEOUT
        } else {
            Duration::from_secs(self.request_timeout_secs)
        }
    }

    /// Joins the origin with an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Returns the platform-specific configuration file path.
pub fn config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata).join("moodlens").join("client.toml")
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home)
            .join(".config")
            .join("moodlens")
            .join("client.toml")
    }
}
