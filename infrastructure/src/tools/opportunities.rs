//! Opportunity tools

use async_trait::async_trait;
use dataverse_application::{DataServicePort, OpportunitiesUseCase};
use dataverse_domain::tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    provider::{ProviderError, ToolProvider},
    value_objects::ToolResult,
};
use dataverse_domain::{DEFAULT_TOP, ListOpportunitiesFilter};
use std::sync::Arc;

use super::args::{self, CallResult, params};

pub const LIST_OPPORTUNITIES: &str = "Opportunities_list_opportunities";
pub const GET_OPPORTUNITY: &str = "Opportunities_get_opportunity";
pub const LIST_OPPORTUNITIES_BY_OWNER: &str = "Opportunities_list_opportunities_by_owner";
pub const INSPECT_OPPORTUNITY_FIELDS: &str = "Opportunities_inspect_opportunity_fields";

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            LIST_OPPORTUNITIES,
            "List the top N opportunities, optionally filtered by status \
             (0 = open, 1 = won, 2 = lost) and owner GUID, and sorted.",
        )
        .with_parameter(params::top(DEFAULT_TOP))
        .with_parameter(params::status("0 = open, 1 = won, 2 = lost"))
        .with_parameter(ToolParameter::optional(
            "owner_id",
            "GUID of the owning user",
            ParamType::String,
        ))
        .with_parameter(params::sort_by())
        .with_parameter(params::sort_direction()),
        ToolDefinition::new(GET_OPPORTUNITY, "Retrieve a single opportunity by its ID.")
            .with_parameter(params::id("opportunity_id", "GUID of the opportunity"))
            .with_parameter(params::select()),
        ToolDefinition::new(
            LIST_OPPORTUNITIES_BY_OWNER,
            "List the opportunities owned by a user.",
        )
        .with_parameter(params::id("user_id", "GUID of the owning user")),
        ToolDefinition::new(
            INSPECT_OPPORTUNITY_FIELDS,
            "Return the columns of an opportunity record.",
        ),
    ]
}

pub struct OpportunitiesProvider {
    opportunities: OpportunitiesUseCase,
}

impl OpportunitiesProvider {
    pub fn new(data: Arc<dyn DataServicePort>) -> Self {
        Self {
            opportunities: OpportunitiesUseCase::new(data),
        }
    }

    async fn run(&self, call: &ToolCall) -> CallResult {
        let opportunities = &self.opportunities;
        let output = match call.tool_name.as_str() {
            LIST_OPPORTUNITIES => {
                let filter: ListOpportunitiesFilter = args::decode(call)?;
                args::records(opportunities.list_opportunities(&filter).await?)
            }
            GET_OPPORTUNITY => {
                let id = args::required_str(call, "opportunity_id")?;
                let select = args::optional_str(call, "select");
                args::record(opportunities.get_opportunity(id, select).await?)
            }
            LIST_OPPORTUNITIES_BY_OWNER => {
                let user_id = args::required_str(call, "user_id")?;
                args::records(opportunities.list_opportunities_by_owner(user_id).await?)
            }
            INSPECT_OPPORTUNITY_FIELDS => {
                args::fields(opportunities.inspect_opportunity_fields().await?)
            }
            other => return Err(ProviderError::ToolNotFound(other.to_string()).into()),
        };
        Ok(output)
    }
}

#[async_trait]
impl ToolProvider for OpportunitiesProvider {
    fn id(&self) -> &str {
        "opportunities"
    }

    fn display_name(&self) -> &str {
        "Opportunities"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        definitions()
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        args::finish(call, self.run(call).await)
    }
}
