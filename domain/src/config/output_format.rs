//! Output format value object

use serde::{Deserialize, Serialize};

/// How tool output is rendered on the console
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output with colored headings (default)
    #[default]
    Pretty,
    /// Machine-readable JSON of the whole tool result
    Json,
}
