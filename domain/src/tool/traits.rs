//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

use super::entities::{ToolCall, ToolDefinition};

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Checks presence of required parameters, rejects unknown ones and
/// mistyped values. `null` counts as absent.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in definition.required_parameters() {
            if call.get(&param.name).is_none() {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        for (arg_name, value) in &call.arguments {
            let Some(param) = definition.parameter(arg_name) else {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            };
            if !value.is_null() && !param.param_type.accepts(value) {
                return Err(format!(
                    "Parameter '{}' for tool '{}' must be of type {}, got {}",
                    arg_name, definition.name, param.param_type, value
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ParamType, ToolParameter};
    use serde_json::Value;

    fn get_account() -> ToolDefinition {
        ToolDefinition::new("Accounts_get_account", "Get an account")
            .with_parameter(ToolParameter::required(
                "account_id",
                "Account GUID",
                ParamType::String,
            ))
            .with_parameter(ToolParameter::optional(
                "select",
                "Columns to return",
                ParamType::String,
            ))
    }

    #[test]
    fn test_validator_missing_required() {
        let call = ToolCall::new("Accounts_get_account");
        let result = DefaultToolValidator.validate(&call, &get_account());
        assert!(result.unwrap_err().contains("Missing required parameter"));
    }

    #[test]
    fn test_validator_null_required_is_missing() {
        let call = ToolCall::new("Accounts_get_account").with_arg("account_id", Value::Null);
        assert!(DefaultToolValidator.validate(&call, &get_account()).is_err());
    }

    #[test]
    fn test_validator_unknown_param() {
        let call = ToolCall::new("Accounts_get_account")
            .with_arg("account_id", "a-1")
            .with_arg("min_revenue", 100);
        let result = DefaultToolValidator.validate(&call, &get_account());
        assert!(result.unwrap_err().contains("Unknown parameter 'min_revenue'"));
    }

    #[test]
    fn test_validator_wrong_type() {
        let definition = ToolDefinition::new("Accounts_list_accounts", "List").with_parameter(
            ToolParameter::optional("top", "Max records", ParamType::Integer).with_default(5),
        );
        let call = ToolCall::new("Accounts_list_accounts").with_arg("top", "five");
        let result = DefaultToolValidator.validate(&call, &definition);
        assert!(result.unwrap_err().contains("must be of type integer"));
    }

    #[test]
    fn test_validator_valid_call() {
        let call = ToolCall::new("Accounts_get_account")
            .with_arg("account_id", "a-1")
            .with_arg("select", Value::Null);
        assert!(DefaultToolValidator.validate(&call, &get_account()).is_ok());
    }
}
