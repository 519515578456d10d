//! Generate Manifest use case
//!
//! Builds the [`ToolManifest`] describing every registered tool. The input
//! schemas come from the [`ToolSchemaPort`] so the manifest and the live
//! tool surface never disagree.

use crate::ports::tool_schema::ToolSchemaPort;
use dataverse_domain::tool::manifest::{DEFAULT_SCHEMA_VERSION, DEFAULT_SERVER_NAME};
use dataverse_domain::{ManifestTool, ToolManifest, ToolSpec};
use std::sync::Arc;
use tracing::debug;

/// Input for the GenerateManifest use case
#[derive(Debug, Clone)]
pub struct GenerateManifestInput {
    /// Server name advertised in the manifest
    pub name: String,
    pub schema_version: String,
}

impl Default for GenerateManifestInput {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_string(),
            schema_version: DEFAULT_SCHEMA_VERSION.to_string(),
        }
    }
}

pub struct GenerateManifestUseCase {
    schema: Arc<dyn ToolSchemaPort>,
}

impl GenerateManifestUseCase {
    pub fn new(schema: Arc<dyn ToolSchemaPort>) -> Self {
        Self { schema }
    }

    pub fn execute(&self, spec: &ToolSpec, input: GenerateManifestInput) -> ToolManifest {
        let mut manifest = ToolManifest::new(input.name, input.schema_version);
        for tool in spec.sorted() {
            manifest.push(ManifestTool {
                name: tool.name.clone(),
                title: tool.title.clone(),
                description: tool.description.clone(),
                input_schema: self.schema.input_schema(tool),
            });
        }
        debug!(tools = manifest.tools.len(), "Generated tool manifest");
        manifest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataverse_domain::ToolDefinition;
    use serde_json::{Value, json};

    struct NameOnlySchema;

    impl ToolSchemaPort for NameOnlySchema {
        fn input_schema(&self, tool: &ToolDefinition) -> Value {
            json!({"title": format!("{}Input", tool.name), "type": "object"})
        }

        fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
            json!({"name": tool.name})
        }

        fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<Value> {
            spec.sorted().into_iter().map(|t| self.tool_to_schema(t)).collect()
        }
    }

    #[test]
    fn test_manifest_lists_tools_sorted() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("Users_list_users", "List users"))
            .register(ToolDefinition::new("Accounts_get_account", "Get an account"))
            .register_alias("AccountsPlugin_get_account", "Accounts_get_account");
        let use_case = GenerateManifestUseCase::new(Arc::new(NameOnlySchema));

        let manifest = use_case.execute(&spec, GenerateManifestInput::default());

        assert_eq!(manifest.name, "SalesDataverseServer");
        assert_eq!(manifest.schema_version, "1.0");
        assert_eq!(manifest.tools.len(), 2);
        assert_eq!(manifest.tools[0].name, "Accounts_get_account");
        assert_eq!(manifest.tools[0].title, "Accounts Get Account");
        assert_eq!(
            manifest.tools[1].input_schema["title"],
            "Users_list_usersInput"
        );
    }

    #[test]
    fn test_manifest_custom_name() {
        let use_case = GenerateManifestUseCase::new(Arc::new(NameOnlySchema));
        let input = GenerateManifestInput {
            name: "Staging".into(),
            ..Default::default()
        };
        let manifest = use_case.execute(&ToolSpec::new(), input);
        assert_eq!(manifest.name, "Staging");
        assert!(manifest.tools.is_empty());
    }
}
