//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how their inputs are
//! described as JSON Schema" (infrastructure).

use dataverse_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to JSON Schema.
pub trait ToolSchemaPort: Send + Sync {
    /// Input schema of a single tool (`{title, type: "object", properties, required}`).
    fn input_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Full descriptor (`{name, title, description, inputSchema}`) of a single tool.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Descriptors of all tools, sorted by name.
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value>;
}
