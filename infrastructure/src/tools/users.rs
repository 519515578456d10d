//! User and business unit tools

use async_trait::async_trait;
use dataverse_application::{DataServicePort, UsersUseCase};
use dataverse_domain::tool::{
    entities::{ToolCall, ToolDefinition},
    provider::{ProviderError, ToolProvider},
    value_objects::ToolResult,
};
use dataverse_domain::DEFAULT_TOP;
use std::sync::Arc;

use super::args::{self, CallResult, params};

pub const LIST_USERS: &str = "Users_list_users";
pub const GET_USER: &str = "Users_get_user";
pub const GET_USERS_BY_NAME: &str = "Users_get_users_by_name";
pub const GET_DIRECT_REPORTS: &str = "Users_get_direct_reports";
pub const GET_BUSINESS_UNIT_BY_ID: &str = "Users_get_business_unit_by_id";
pub const INSPECT_USER_FIELDS: &str = "Users_inspect_user_fields";

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(LIST_USERS, "List the top N users.")
            .with_parameter(params::top(DEFAULT_TOP)),
        ToolDefinition::new(GET_USER, "Retrieve a single user by their GUID.")
            .with_parameter(params::id("user_id", "GUID of the user"))
            .with_parameter(params::select()),
        ToolDefinition::new(
            GET_USERS_BY_NAME,
            "Retrieve users whose full name contains the given text.",
        )
        .with_parameter(params::id("name", "Substring of the user's full name")),
        ToolDefinition::new(
            GET_DIRECT_REPORTS,
            "Retrieve users who report directly to a manager.",
        )
        .with_parameter(params::id("manager", "GUID of the manager")),
        ToolDefinition::new(
            GET_BUSINESS_UNIT_BY_ID,
            "Retrieve a business unit by its ID.",
        )
        .with_parameter(params::id("business_unit_id", "GUID of the business unit")),
        ToolDefinition::new(INSPECT_USER_FIELDS, "Return the columns of a user record."),
    ]
}

pub struct UsersProvider {
    users: UsersUseCase,
}

impl UsersProvider {
    pub fn new(data: Arc<dyn DataServicePort>) -> Self {
        Self {
            users: UsersUseCase::new(data),
        }
    }

    async fn run(&self, call: &ToolCall) -> CallResult {
        let users = &self.users;
        let output = match call.tool_name.as_str() {
            LIST_USERS => args::records(users.list_users(args::top(call, DEFAULT_TOP)?).await?),
            GET_USER => {
                let id = args::required_str(call, "user_id")?;
                args::record(users.get_user(id, args::optional_str(call, "select")).await?)
            }
            GET_USERS_BY_NAME => {
                let name = args::required_str(call, "name")?;
                args::records(users.get_users_by_name(name).await?)
            }
            GET_DIRECT_REPORTS => {
                let manager = args::required_str(call, "manager")?;
                args::records(users.get_direct_reports(manager).await?)
            }
            GET_BUSINESS_UNIT_BY_ID => {
                let id = args::required_str(call, "business_unit_id")?;
                args::record(users.get_business_unit_by_id(id).await?)
            }
            INSPECT_USER_FIELDS => args::fields(users.inspect_user_fields().await?),
            other => return Err(ProviderError::ToolNotFound(other.to_string()).into()),
        };
        Ok(output)
    }
}

#[async_trait]
impl ToolProvider for UsersProvider {
    fn id(&self) -> &str {
        "users"
    }

    fn display_name(&self) -> &str {
        "Users"
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

    #[tokio::test]
    async fn test_get_users_by_name_quotes_text() {
        let data = RecordingDataService::new().shared();
        let provider = UsersProvider::new(data.clone());

        provider
            .execute(&ToolCall::new(GET_USERS_BY_NAME).with_arg("name", "O'Brien"))
            .await;

        assert_eq!(
            data.requests(),
            vec!["GET systemusers?$filter=contains(fullname, 'O''Brien')"]
        );
    }

    #[tokio::test]
    async fn test_direct_reports() {
        let data = RecordingDataService::new().shared();
        let provider = UsersProvider::new(data.clone());

        provider
            .execute(&ToolCall::new(GET_DIRECT_REPORTS).with_arg("manager", "m-1"))
            .await;

        assert_eq!(
            data.requests(),
            vec!["GET systemusers?$filter=_parentsystemuserid_value eq m-1"]
        );
    }

    #[tokio::test]
    async fn test_business_unit_lookup() {
        let data = RecordingDataService::new().shared();
        let provider = UsersProvider::new(data.clone());

        provider
            .execute(&ToolCall::new(GET_BUSINESS_UNIT_BY_ID).with_arg("business_unit_id", "bu-1"))
            .await;

        assert_eq!(data.requests(), vec!["GET businessunits(bu-1)"]);
    }
}
