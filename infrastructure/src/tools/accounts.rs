//! Account tools: listing, lookup, fuzzy search, relationships and the
//! deal summary

use async_trait::async_trait;
use dataverse_application::{AccountsUseCase, DataServicePort};
use dataverse_domain::tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    provider::{ProviderError, ToolProvider},
    value_objects::ToolResult,
};
use dataverse_domain::{DEFAULT_SEARCH_TOP, DEFAULT_TOP, ListAccountsFilter};
use std::sync::Arc;

use super::args::{self, CallResult, params};

pub const LIST_ACCOUNTS: &str = "Accounts_list_accounts";
pub const GET_ACCOUNT: &str = "Accounts_get_account";
pub const SEARCH_ACCOUNTS_BY_NAME: &str = "Accounts_search_accounts_by_name";
pub const LIST_ACCOUNT_OPPORTUNITIES: &str = "Accounts_list_account_opportunities";
pub const LIST_ACCOUNT_ORDERS: &str = "Accounts_list_account_orders";
pub const GET_ACCOUNT_DEAL_SUMMARY: &str = "Accounts_get_account_deal_summary";
pub const INSPECT_ACCOUNT_FIELDS: &str = "Accounts_inspect_account_fields";

fn account_id() -> ToolParameter {
    params::id("account_id", "GUID of the account")
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            LIST_ACCOUNTS,
            "List the top N accounts. Optional filters for region (NAR, CALA, MEA, Europe \
             or APAC), status (0 = active, 1 = inactive) and owning business unit GUID. \
             If sort_by is provided, sort_direction must also be provided as 'asc' or 'desc'.",
        )
        .with_parameter(params::top(DEFAULT_TOP))
        .with_parameter(ToolParameter::optional(
            "region",
            "Sales region: NAR, CALA, MEA, Europe or APAC",
            ParamType::String,
        ))
        .with_parameter(params::status("0 = active, 1 = inactive"))
        .with_parameter(ToolParameter::optional(
            "business_unit_id",
            "GUID of the owning business unit",
            ParamType::String,
        ))
        .with_parameter(params::sort_by())
        .with_parameter(params::sort_direction()),
        ToolDefinition::new(GET_ACCOUNT, "Retrieve a single account by its ID.")
            .with_parameter(account_id())
            .with_parameter(params::select()),
        ToolDefinition::new(
            SEARCH_ACCOUNTS_BY_NAME,
            "Fuzzy search for accounts by name, tolerating typos and misspellings. \
             Returns the top N results ranked by relevance.",
        )
        .with_parameter(params::id("search_query", "Keyword to match against account names"))
        .with_parameter(params::top(DEFAULT_SEARCH_TOP)),
        ToolDefinition::new(
            LIST_ACCOUNT_OPPORTUNITIES,
            "List all sales opportunities of an account, optionally filtered by status.",
        )
        .with_parameter(account_id())
        .with_parameter(params::status("0 = open, 1 = won, 2 = lost")),
        ToolDefinition::new(
            LIST_ACCOUNT_ORDERS,
            "List all sales orders of an account, optionally filtered by status.",
        )
        .with_parameter(account_id())
        .with_parameter(params::status(
            "0 = active, 1 = submitted, 2 = cancelled, 3 = fulfilled, 4 = invoiced",
        )),
        ToolDefinition::new(
            GET_ACCOUNT_DEAL_SUMMARY,
            "Summarize open, won and lost opportunities and revenues for an account.",
        )
        .with_parameter(account_id()),
        ToolDefinition::new(INSPECT_ACCOUNT_FIELDS, "Return the columns of an account record."),
    ]
}

/// Provider for the `Accounts_*` tools
pub struct AccountsProvider {
    accounts: AccountsUseCase,
}

impl AccountsProvider {
    pub fn new(data: Arc<dyn DataServicePort>, search_path: impl Into<String>) -> Self {
        Self {
            accounts: AccountsUseCase::new(data, search_path),
        }
    }

    async fn run(&self, call: &ToolCall) -> CallResult {
        let accounts = &self.accounts;
        let output = match call.tool_name.as_str() {
            LIST_ACCOUNTS => {
                let filter: ListAccountsFilter = args::decode(call)?;
                args::records(accounts.list_accounts(&filter).await?)
            }
            GET_ACCOUNT => {
                let id = args::required_str(call, "account_id")?;
                let select = args::optional_str(call, "select");
                args::record(accounts.get_account(id, select).await?)
            }
            SEARCH_ACCOUNTS_BY_NAME => {
                let query = args::required_str(call, "search_query")?;
                let top = args::top(call, DEFAULT_SEARCH_TOP)?;
                accounts.search_accounts_by_name(query, top).await?
            }
            LIST_ACCOUNT_OPPORTUNITIES => {
                let id = args::required_str(call, "account_id")?;
                let status = args::optional_code(call, "status");
                args::records(accounts.list_account_opportunities(id, status).await?)
            }
            LIST_ACCOUNT_ORDERS => {
                let id = args::required_str(call, "account_id")?;
                let status = args::optional_code(call, "status");
                args::records(accounts.list_account_orders(id, status).await?)
            }
            GET_ACCOUNT_DEAL_SUMMARY => {
                let id = args::required_str(call, "account_id")?;
                args::record(accounts.get_account_deal_summary(id).await?)
            }
            INSPECT_ACCOUNT_FIELDS => args::fields(accounts.inspect_account_fields().await?),
            other => return Err(ProviderError::ToolNotFound(other.to_string()).into()),
        };
        Ok(output)
    }
}

#[async_trait]
impl ToolProvider for AccountsProvider {
    fn id(&self) -> &str {
        "accounts"
    }

    fn display_name(&self) -> &str {
        "Accounts"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        definitions()
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        args::finish(call, self.run(call).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::RecordingDataService;
    use dataverse_application::{DEFAULT_SEARCH_PATH, DataServiceError};
    use dataverse_domain::tool::value_objects::ToolError;
    use serde_json::json;

    fn provider(data: Arc<RecordingDataService>) -> AccountsProvider {
        AccountsProvider::new(data, DEFAULT_SEARCH_PATH)
    }

    #[test]
    fn test_definitions() {
        let tools = definitions();
        assert_eq!(tools.len(), 7);
        assert!(tools.iter().all(|t| t.name.starts_with("Accounts_")));

        let search = tools.iter().find(|t| t.name == SEARCH_ACCOUNTS_BY_NAME).unwrap();
        assert_eq!(search.parameter("top").unwrap().default, Some(json!(10)));
        assert!(search.parameter("search_query").unwrap().required);
    }

    #[tokio::test]
    async fn test_list_accounts() {
        let data = RecordingDataService::new()
            .respond(
                "GET accounts?$top=3&$filter=cs_accountsalesregion eq 'NAR' and statecode eq 0&$orderby=name asc",
                json!([{"name": "Contoso"}]),
            )
            .shared();
        let call = ToolCall::new(LIST_ACCOUNTS)
            .with_arg("top", 3)
            .with_arg("region", "NAR")
            .with_arg("status", 0)
            .with_arg("sort_by", "name")
            .with_arg("sort_direction", "asc");

        let result = provider(data).execute(&call).await;

        assert!(result.is_success());
        assert_eq!(result.output(), Some(&json!([{"name": "Contoso"}])));
        assert_eq!(result.metadata.record_count, Some(1));
    }

    #[tokio::test]
    async fn test_list_accounts_rejects_zero_top() {
        let data = RecordingDataService::new().shared();
        let call = ToolCall::new(LIST_ACCOUNTS).with_arg("top", 0);

        let result = provider(data.clone()).execute(&call).await;

        assert_eq!(result.error().unwrap().code, ToolError::INVALID_ARGUMENT);
        assert!(data.requests().is_empty());
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let data = RecordingDataService::new().shared();
        let call = ToolCall::new(GET_ACCOUNT).with_arg("account_id", "missing");

        let result = provider(data.clone()).execute(&call).await;

        assert_eq!(result.error().unwrap().code, ToolError::NOT_FOUND);
        assert_eq!(data.requests(), vec!["GET accounts(missing)"]);
    }

    #[tokio::test]
    async fn test_deal_summary() {
        let data = RecordingDataService::new()
            .respond(
                "GET opportunities?$apply=filter(_parentaccountid_value eq a1 and statecode eq 0)/aggregate($count as open_deal_count, estimatedvalue with sum as open_revenue)",
                json!([{"open_deal_count": 3, "open_revenue": 150000}]),
            )
            .shared();
        let call = ToolCall::new(GET_ACCOUNT_DEAL_SUMMARY).with_arg("account_id", "a1");

        let result = provider(data).execute(&call).await;

        let output = result.output().unwrap();
        assert_eq!(output["open_deal_count"], 3);
        assert_eq!(output["open_revenue"], 150000);
        assert_eq!(output["won_revenue"], 0);
        assert_eq!(output["lost_deal_count"], 0);
    }

    #[tokio::test]
    async fn test_search_posts_to_search_path() {
        let data = RecordingDataService::new()
            .respond("POST /api/search/v1.0/query", json!({"value": [{"score": 1.0}]}))
            .shared();
        let call = ToolCall::new(SEARCH_ACCOUNTS_BY_NAME).with_arg("search_query", "contso");

        let result = provider(data).execute(&call).await;

        assert!(result.is_success());
        assert_eq!(result.output().unwrap()["value"][0]["score"], 1.0);
    }

    #[tokio::test]
    async fn test_list_account_orders_timeout() {
        let data = RecordingDataService::new()
            .fail(
                "GET salesorders?$filter=_customerid_value eq a1",
                DataServiceError::Timeout("deadline elapsed".into()),
            )
            .shared();
        let call = ToolCall::new(LIST_ACCOUNT_ORDERS).with_arg("account_id", "a1");

        let result = provider(data).execute(&call).await;

        assert_eq!(result.error().unwrap().code, ToolError::TIMEOUT);
    }

    #[tokio::test]
    async fn test_inspect_fields_empty() {
        let data = RecordingDataService::new().shared();
        let result = provider(data)
            .execute(&ToolCall::new(INSPECT_ACCOUNT_FIELDS))
            .await;
        assert_eq!(result.output(), Some(&json!([])));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let data = RecordingDataService::new().shared();
        let result = provider(data)
            .execute(&ToolCall::new("Accounts_delete_account"))
            .await;
        assert_eq!(result.error().unwrap().code, ToolError::NOT_FOUND);
    }
}
