//! Authentication configuration from TOML (`[auth]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOKEN_ENV: &str = "DATAVERSE_TOKEN";

/// Where the bearer token comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    /// Azure Developer CLI login (`azd auth token`)
    #[default]
    Azd,
    /// Static token from an environment variable
    Token,
}

/// Raw authentication configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuthConfig {
    pub method: AuthMethod,
    /// Environment variable holding the token for `method = "token"`
    pub token_env: String,
    /// Program invoked for `method = "azd"`
    pub azd_program: String,
}

impl Default for FileAuthConfig {
    fn default() -> Self {
        Self {
            method: AuthMethod::default(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            azd_program: "azd".to_string(),
        }
    }
}
