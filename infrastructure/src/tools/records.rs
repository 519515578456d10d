//! Generic list/get/inspect tools for entities without bespoke operations
//!
//! One [`RecordsProvider`] per entity set. Tool names derive from the
//! entity: `Leads_list_leads`, `Leads_get_lead` (parameter `lead_id`),
//! `Leads_inspect_lead_fields`.

use async_trait::async_trait;
use dataverse_application::{DataServicePort, RecordsUseCase};
use dataverse_domain::tool::{
    entities::{ToolCall, ToolDefinition},
    provider::{ProviderError, ToolProvider},
    value_objects::ToolResult,
};
use dataverse_domain::{DEFAULT_TOP, EntitySet, RecordKey};
use std::sync::Arc;

use super::args::{self, CallResult, params};

/// Entities served by the generic provider, with their tool prefix.
pub const GENERIC_ENTITIES: [(EntitySet, &str); 6] = [
    (EntitySet::Leads, "Leads"),
    (EntitySet::Quotes, "Quotes"),
    (EntitySet::Contacts, "Contacts"),
    (EntitySet::Teams, "Teams"),
    (EntitySet::Invoices, "Invoices"),
    (EntitySet::Competitors, "Competitors"),
];

struct ToolNames {
    list: String,
    get: String,
    inspect: String,
    id_param: String,
}

impl ToolNames {
    fn new(entity: EntitySet, prefix: &str) -> Self {
        let logical = entity.logical_name();
        Self {
            list: format!("{}_list_{}", prefix, entity.as_str()),
            get: format!("{}_get_{}", prefix, logical),
            inspect: format!("{}_inspect_{}_fields", prefix, logical),
            id_param: format!("{}_id", logical),
        }
    }
}

pub fn definitions(entity: EntitySet, prefix: &str) -> Vec<ToolDefinition> {
    let names = ToolNames::new(entity, prefix);
    let logical = entity.logical_name();
    vec![
        ToolDefinition::new(
            names.list,
            format!("List the top N {} records.", logical),
        )
        .with_parameter(params::top(DEFAULT_TOP)),
        ToolDefinition::new(
            names.get,
            format!("Retrieve a single {} by its ID.", logical),
        )
        .with_parameter(params::id(
            &names.id_param,
            &format!("GUID of the {}", logical),
        ))
        .with_parameter(params::select()),
        ToolDefinition::new(
            names.inspect,
            format!("Return the columns of a {} record.", logical),
        ),
    ]
}

pub struct RecordsProvider {
    entity: EntitySet,
    prefix: &'static str,
    id: String,
    names: ToolNames,
    records: RecordsUseCase,
}

impl RecordsProvider {
    pub fn new(entity: EntitySet, prefix: &'static str, data: Arc<dyn DataServicePort>) -> Self {
        Self {
            entity,
            prefix,
            id: entity.as_str().to_string(),
            names: ToolNames::new(entity, prefix),
            records: RecordsUseCase::new(data),
        }
    }

    /// One provider per entity in [`GENERIC_ENTITIES`].
    pub fn all(data: Arc<dyn DataServicePort>) -> Vec<Self> {
        GENERIC_ENTITIES
            .iter()
            .map(|&(entity, prefix)| Self::new(entity, prefix, data.clone()))
            .collect()
    }

    async fn run(&self, call: &ToolCall) -> CallResult {
        let name = call.tool_name.as_str();
        let output = if name == self.names.list {
            let top = args::top(call, DEFAULT_TOP)?;
            args::records(self.records.list(self.entity, top).await?)
        } else if name == self.names.get {
            let id = args::required_str(call, &self.names.id_param)?;
            let select = args::optional_str(call, "select");
            args::record(
                self.records
                    .get(self.entity, &RecordKey::id(id), select)
                    .await?,
            )
        } else if name == self.names.inspect {
            args::fields(self.records.inspect_fields(self.entity).await?)
        } else {
            return Err(ProviderError::ToolNotFound(name.to_string()).into());
        };
        Ok(output)
    }
}

#[async_trait]
impl ToolProvider for RecordsProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        self.prefix
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        definitions(self.entity, self.prefix)
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        args::finish(call, self.run(call).await)
    }
}
