//! Argument decoding and result shaping shared by the entity providers

use dataverse_application::UseCaseError;
use dataverse_domain::tool::{
    entities::{ParamType, ToolCall, ToolParameter},
    provider::ProviderError,
    value_objects::{ToolError, ToolResult},
};
use dataverse_domain::Record;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Failure of a single tool call, before it is turned into a [`ToolError`].
#[derive(Debug, Error)]
pub(crate) enum CallError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    UseCase(#[from] UseCaseError),
}

impl CallError {
    pub(crate) fn into_tool_error(self) -> ToolError {
        match self {
            CallError::Provider(ProviderError::InvalidArgument(msg)) => {
                ToolError::invalid_argument(msg)
            }
            CallError::Provider(ProviderError::ToolNotFound(name)) => ToolError::not_found(name),
            CallError::Provider(e) => ToolError::execution_failed(e.to_string()),
            CallError::UseCase(UseCaseError::InvalidInput(e)) => {
                ToolError::invalid_argument(e.to_string())
            }
            CallError::UseCase(UseCaseError::DataService(e)) => {
                let code = if e.is_not_found() {
                    ToolError::NOT_FOUND
                } else if e.is_timeout() {
                    ToolError::TIMEOUT
                } else {
                    ToolError::EXECUTION_FAILED
                };
                ToolError::new(code, e.to_string())
            }
        }
    }
}

pub(crate) type CallResult = Result<Value, CallError>;

/// Wrap the outcome of an operation into a [`ToolResult`].
pub(crate) fn finish(call: &ToolCall, outcome: CallResult) -> ToolResult {
    match outcome {
        Ok(output) => ToolResult::success(&call.tool_name, output),
        Err(e) => ToolResult::failure(&call.tool_name, e.into_tool_error()),
    }
}

/// Decode the call's arguments into an operation input struct.
///
/// `null` arguments are dropped first so that they fall back to the
/// struct's defaults, exactly like omitted ones.
pub(crate) fn decode<T: DeserializeOwned>(call: &ToolCall) -> Result<T, ProviderError> {
    top(call, 1)?;
    let args: Map<String, Value> = call
        .arguments
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    serde_json::from_value(Value::Object(args))
        .map_err(|e| ProviderError::InvalidArgument(e.to_string()))
}

pub(crate) fn required_str<'a>(call: &'a ToolCall, key: &str) -> Result<&'a str, ProviderError> {
    call.require_string(key)
        .map_err(ProviderError::InvalidArgument)
}

/// Optional string argument; empty strings count as absent.
pub(crate) fn optional_str<'a>(call: &'a ToolCall, key: &str) -> Option<&'a str> {
    call.get_string(key).filter(|s| !s.is_empty())
}

pub(crate) fn optional_code(call: &ToolCall, key: &str) -> Option<i64> {
    call.get_i64(key)
}

/// `top` argument, or `default` when omitted. Zero and negative counts are rejected.
pub(crate) fn top(call: &ToolCall, default: u32) -> Result<u32, ProviderError> {
    match call.get_i64("top") {
        None => Ok(default),
        Some(n) => u32::try_from(n)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                ProviderError::InvalidArgument(format!("top must be a positive integer, got {n}"))
            }),
    }
}

pub(crate) fn records(records: Vec<Record>) -> Value {
    Value::Array(records.into_iter().map(Value::Object).collect())
}

pub(crate) fn record(record: Record) -> Value {
    Value::Object(record)
}

pub(crate) fn fields(names: Vec<String>) -> Value {
    Value::Array(names.into_iter().map(Value::String).collect())
}

/// Common parameter builders
pub(crate) mod params {
    use super::*;

    pub fn top(default: u32) -> ToolParameter {
        ToolParameter::optional("top", "Maximum number of records to return", ParamType::Integer)
            .with_default(default)
    }

    pub fn status(codes: &str) -> ToolParameter {
        ToolParameter::optional(
            "status",
            format!("Numeric status code ({codes})"),
            ParamType::Integer,
        )
    }

    pub fn sort_by() -> ToolParameter {
        ToolParameter::optional(
            "sort_by",
            "Column to sort by; requires sort_direction",
            ParamType::String,
        )
    }

    pub fn sort_direction() -> ToolParameter {
        ToolParameter::optional(
            "sort_direction",
            "'asc' or 'desc'; requires sort_by",
            ParamType::String,
        )
    }

    pub fn select() -> ToolParameter {
        ToolParameter::optional(
            "select",
            "Comma-separated list of columns to return",
            ParamType::String,
        )
    }

    pub fn id(name: &str, description: &str) -> ToolParameter {
        ToolParameter::required(name, description, ParamType::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataverse_application::DataServiceError;
    use dataverse_domain::{DomainError, ListAccountsFilter};
    use serde_json::json;

    #[test]
    fn test_decode_drops_nulls() {
        let call = ToolCall::new("Accounts_list_accounts")
            .with_arg("top", 3)
            .with_arg("region", Value::Null)
            .with_arg("status", 0);

        let filter: ListAccountsFilter = decode(&call).unwrap();
        assert_eq!(filter.top, 3);
        assert_eq!(filter.region, None);
        assert_eq!(filter.status, Some(0));
    }

    #[test]
    fn test_decode_defaults() {
        let filter: ListAccountsFilter = decode(&ToolCall::new("Accounts_list_accounts")).unwrap();
        assert_eq!(filter, ListAccountsFilter::default());
    }

    #[test]
    fn test_decode_rejects_negative_top() {
        let call = ToolCall::new("Accounts_list_accounts").with_arg("top", -1);
        let err = decode::<ListAccountsFilter>(&call).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidArgument(_)));
    }

    #[test]
    fn test_decode_rejects_zero_top() {
        let call = ToolCall::new("Accounts_list_accounts").with_arg("top", 0);
        let err = decode::<ListAccountsFilter>(&call).unwrap_err();
        assert!(
            matches!(err, ProviderError::InvalidArgument(ref msg) if msg == "top must be a positive integer, got 0")
        );
    }

    #[test]
    fn test_top() {
        let call = ToolCall::new("Leads_list_leads");
        assert_eq!(top(&call, 5).unwrap(), 5);
        assert_eq!(top(&call.clone().with_arg("top", 12), 5).unwrap(), 12);
        assert!(top(&call.clone().with_arg("top", 0), 5).is_err());
        assert!(top(&call.with_arg("top", -2), 5).is_err());
    }

    #[test]
    fn test_optional_str_empty_is_absent() {
        let call = ToolCall::new("Orders_get_order").with_arg("order_id", "");
        assert_eq!(optional_str(&call, "order_id"), None);
    }

    #[test]
    fn test_error_mapping() {
        let not_found: CallError = UseCaseError::from(DataServiceError::Http {
            status: 404,
            body: "Does Not Exist".into(),
        })
        .into();
        let err = not_found.into_tool_error();
        assert_eq!(err.code, ToolError::NOT_FOUND);
        assert!(err.message.contains("Does Not Exist"));

        let timeout: CallError =
            UseCaseError::from(DataServiceError::Timeout("10s".into())).into();
        assert_eq!(timeout.into_tool_error().code, ToolError::TIMEOUT);

        let remote: CallError = UseCaseError::from(DataServiceError::Http {
            status: 400,
            body: "bad filter".into(),
        })
        .into();
        assert_eq!(remote.into_tool_error().code, ToolError::EXECUTION_FAILED);

        let input: CallError = UseCaseError::from(DomainError::missing_identifier([
            "order_id",
            "order_number",
        ]))
        .into();
        let err = input.into_tool_error();
        assert_eq!(err.code, ToolError::INVALID_ARGUMENT);
        assert_eq!(err.message, "Either order_id or order_number must be provided");
    }

    #[test]
    fn test_finish() {
        let call = ToolCall::new("Leads_list_leads");
        let ok = finish(&call, Ok(json!([{"leadid": "1"}])));
        assert!(ok.is_success());
        assert_eq!(ok.metadata.record_count, Some(1));
    }
}
