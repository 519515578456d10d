//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod auth;
mod dataverse;
mod server;

pub use auth::{AuthMethod, DEFAULT_TOKEN_ENV, FileAuthConfig};
pub use dataverse::{DEFAULT_SEARCH_PATH, DEFAULT_TIMEOUT_SECONDS, FileDataverseConfig};
pub use server::{DEFAULT_MANIFEST_PATH, FileServerConfig};

use dataverse_domain::OutputFormat;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("dataverse.url is not set (use [dataverse] url or DATAVERSE_URL)")]
    MissingUrl,

    #[error("dataverse.url '{url}' is not a valid URL: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("dataverse.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("dataverse.search_path must start with '/', got '{0}'")]
    InvalidSearchPath(String),

    #[error("auth.token_env cannot be empty when auth.method = \"token\"")]
    EmptyTokenEnv,

    #[error("server.name cannot be empty")]
    EmptyServerName,
}

/// `[output]` section: how command results are rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Format used when `--format` is not given
    pub format: Option<OutputFormat>,
    /// Colored headings and error codes in pretty output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// The command-line format wins over the configured one.
    pub fn resolve_format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.or(self.format).unwrap_or_default()
    }

    /// Color stays on only if neither `--no-color` nor `color = false` disables it.
    pub fn color_enabled(&self, no_color_flag: bool) -> bool {
        self.color && !no_color_flag
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Data service endpoint
    pub dataverse: FileDataverseConfig,
    /// Token acquisition
    pub auth: FileAuthConfig,
    /// Manifest / server identity
    pub server: FileServerConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// A missing URL is not reported here: commands that never reach the
    /// data service (listing tools, writing the manifest) work without one.
    /// See [`FileConfig::base_url`].
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if let Some(url) = &self.dataverse.url
            && let Err(e) = Url::parse(url)
        {
            issues.push(ConfigValidationError::InvalidUrl {
                url: url.clone(),
                reason: e.to_string(),
            });
        }

        if self.dataverse.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout);
        }

        if !self.dataverse.search_path.starts_with('/') {
            issues.push(ConfigValidationError::InvalidSearchPath(
                self.dataverse.search_path.clone(),
            ));
        }

        if self.auth.method == AuthMethod::Token && self.auth.token_env.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyTokenEnv);
        }

        if self.server.name.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyServerName);
        }

        issues
    }

    /// The configured data service URL, required by commands that call tools.
    pub fn base_url(&self) -> Result<&str, ConfigValidationError> {
        let url = self
            .dataverse
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(ConfigValidationError::MissingUrl)?;
        Url::parse(url).map_err(|e| ConfigValidationError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(url)
    }
}
