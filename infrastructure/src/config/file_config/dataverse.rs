//! Data service configuration from TOML (`[dataverse]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_SEARCH_PATH: &str = "/api/search/v1.0/query";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Raw data service configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDataverseConfig {
    /// Web API root, e.g. `https://org.crm.dynamics.com/api/data/v9.2`
    pub url: Option<String>,
    /// Path of the relevance search endpoint, relative to the host
    pub search_path: String,
    /// Timeout applied to parameterized queries
    pub timeout_seconds: u64,
}

impl Default for FileDataverseConfig {
    fn default() -> Self {
        Self {
            url: None,
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}
