//! Tool manifest artifact
//!
//! The manifest is the static description of every callable tool, written to
//! disk so a tool host can advertise them without running the server:
//!
//! ```json
//! {
//!   "name": "SalesDataverseServer",
//!   "schema_version": "1.0",
//!   "tools": [
//!     {
//!       "name": "Accounts_get_account",
//!       "title": "Accounts Get Account",
//!       "description": "...",
//!       "inputSchema": { "title": "get_accountInput", "type": "object", ... }
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_SERVER_NAME: &str = "SalesDataverseServer";
pub const DEFAULT_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolManifest {
    pub name: String,
    pub schema_version: String,
    pub tools: Vec<ManifestTool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestTool {
    pub name: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolManifest {
    pub fn new(name: impl Into<String>, schema_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_version: schema_version.into(),
            tools: Vec::new(),
        }
    }

    /// Add a tool, keeping the list sorted by name.
    pub fn push(&mut self, tool: ManifestTool) {
        let at = self
            .tools
            .partition_point(|existing| existing.name.as_str() < tool.name.as_str());
        self.tools.insert(at, tool);
    }

    pub fn tool(&self, name: &str) -> Option<&ManifestTool> {
        self.tools.iter().find(|t| t.name == name)
    }
}

impl Default for ToolManifest {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_NAME, DEFAULT_SCHEMA_VERSION)
    }
}
