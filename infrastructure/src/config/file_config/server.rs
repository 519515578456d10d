//! Tool server configuration from TOML (`[server]` section)

use dataverse_domain::tool::manifest::{DEFAULT_SCHEMA_VERSION, DEFAULT_SERVER_NAME};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MANIFEST_PATH: &str = ".mcp.json";

/// Raw server configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Server name written to the manifest
    pub name: String,
    pub schema_version: String,
    /// Default output path of `manifest`
    pub manifest_path: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_string(),
            schema_version: DEFAULT_SCHEMA_VERSION.to_string(),
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
        }
    }
}
