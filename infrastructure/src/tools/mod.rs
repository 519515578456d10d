//! CRM tool providers
//!
//! One provider per entity module, each with a static descriptor table:
//! - `accounts`: list, get, fuzzy search, related opportunities/orders, deal summary
//! - `opportunities`, `products`, `orders`, `users`: list, get and their lookups
//! - `records`: generic list/get/inspect for leads, quotes, contacts, teams,
//!   invoices and competitors
//! - `status`: the root `get_server_status` check
//!
//! [`default_registry`] wires them all onto one data service.

pub mod accounts;
pub mod opportunities;
pub mod orders;
pub mod products;
pub mod records;
pub mod status;
pub mod users;

mod args;
mod registry;
mod schema;

#[cfg(test)]
pub(crate) mod testing;

pub use accounts::AccountsProvider;
pub use opportunities::OpportunitiesProvider;
pub use orders::OrdersProvider;
pub use products::ProductsProvider;
pub use records::{GENERIC_ENTITIES, RecordsProvider};
pub use registry::{RegistryStats, ToolRegistry, legacy_alias};
pub use schema::{JsonSchemaToolConverter, operation_name};
pub use status::StatusProvider;
pub use users::UsersProvider;

use dataverse_application::DataServicePort;
use dataverse_domain::tool::{entities::ToolSpec, provider::ProviderError};
use std::sync::Arc;

/// Registry with every entity provider bound to `data`.
pub fn default_registry(
    data: Arc<dyn DataServicePort>,
    search_path: &str,
) -> Result<ToolRegistry, ProviderError> {
    let mut registry = ToolRegistry::new()
        .register(AccountsProvider::new(data.clone(), search_path))?
        .register(OpportunitiesProvider::new(data.clone()))?
        .register(ProductsProvider::new(data.clone()))?
        .register(OrdersProvider::new(data.clone()))?
        .register(UsersProvider::new(data.clone()))?;

    for provider in RecordsProvider::all(data) {
        registry = registry.register(provider)?;
    }

    registry.register(StatusProvider)
}

/// Descriptors of every tool, with legacy aliases, without a data service.
///
/// Used for listing tools and writing the manifest when no endpoint is configured.
pub fn tool_catalog() -> ToolSpec {
    let generic = GENERIC_ENTITIES
        .iter()
        .flat_map(|&(entity, prefix)| records::definitions(entity, prefix));

    accounts::definitions()
        .into_iter()
        .chain(opportunities::definitions())
        .chain(products::definitions())
        .chain(orders::definitions())
        .chain(users::definitions())
        .chain(generic)
        .chain(status::definitions())
        .fold(ToolSpec::new(), |spec, tool| {
            let spec = match legacy_alias(&tool.name) {
                Some(alias) => spec.register_alias(alias, tool.name.clone()),
                None => spec,
            };
            spec.register(tool)
        })
}
