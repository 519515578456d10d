//! Root health-check tool

use async_trait::async_trait;
use dataverse_domain::tool::{
    entities::{ToolCall, ToolDefinition},
    provider::ToolProvider,
    value_objects::{ToolError, ToolResult},
};
use serde_json::json;

pub const GET_SERVER_STATUS: &str = "get_server_status";

pub fn definitions() -> Vec<ToolDefinition> {
    vec![ToolDefinition::new(
        GET_SERVER_STATUS,
        "Check the server status. Returns 'OK' when the tool host is up.",
    )]
}

/// Serves `get_server_status`; needs no data service.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusProvider;

#[async_trait]
impl ToolProvider for StatusProvider {
    fn id(&self) -> &str {
        "status"
    }

    fn display_name(&self) -> &str {
        "Server Status"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        definitions()
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        if call.tool_name == GET_SERVER_STATUS {
            ToolResult::success(&call.tool_name, json!("OK"))
        } else {
            ToolResult::failure(&call.tool_name, ToolError::not_found(&call.tool_name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_status() {
        let result = StatusProvider
            .execute(&ToolCall::new(GET_SERVER_STATUS))
            .await;
        assert!(result.is_success());
        assert_eq!(result.output(), Some(&json!("OK")));
        assert_eq!(result.metadata.record_count, None);
    }
}
