//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`]. Input schemas follow the
//! shape tool hosts expect in a manifest:
//!
//! ```json
//! {
//!   "title": "list_accountsInput",
//!   "type": "object",
//!   "properties": {
//!     "top": { "title": "Top", "type": "integer", "description": "...", "default": 5 }
//!   },
//!   "required": []
//! }
//! ```

use dataverse_application::ports::tool_schema::ToolSchemaPort;
use dataverse_domain::tool::entities::{ToolDefinition, ToolSpec};
use serde_json::{Map, Value, json};

/// Operation part of a callable name: "Accounts_list_accounts" -> "list_accounts".
///
/// Names without an entity prefix (e.g. "get_server_status") are returned whole.
pub fn operation_name(tool_name: &str) -> &str {
    match tool_name.split_once('_') {
        Some((entity, operation)) if entity.starts_with(|c: char| c.is_ascii_uppercase()) => {
            operation
        }
        _ => tool_name,
    }
}

/// "business_unit_id" -> "Business Unit Id"
fn property_title(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Default implementation producing manifest-style JSON Schema.
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn input_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let mut prop = Map::new();
            prop.insert("title".to_string(), json!(property_title(&param.name)));
            prop.insert("type".to_string(), json!(param.param_type.as_str()));
            prop.insert("description".to_string(), json!(param.description));
            if let Some(default) = &param.default {
                prop.insert("default".to_string(), default.clone());
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "title": format!("{}Input", operation_name(&tool.name)),
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        json!({
            "name": tool.name,
            "title": tool.title,
            "description": tool.description,
            "inputSchema": self.input_schema(tool),
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<Value> {
        spec.sorted()
            .into_iter()
            .map(|t| self.tool_to_schema(t))
            .collect()
    }
}
