//! Product catalog tools

use async_trait::async_trait;
use dataverse_application::{DataServicePort, ProductsUseCase};
use dataverse_domain::tool::{
    entities::{ToolCall, ToolDefinition},
    provider::{ProviderError, ToolProvider},
    value_objects::ToolResult,
};
use dataverse_domain::{DEFAULT_TOP, ListProductsFilter};
use std::sync::Arc;

use super::args::{self, CallResult, params};

pub const LIST_PRODUCTS: &str = "Products_list_products";
pub const GET_PRODUCT: &str = "Products_get_product";
pub const INSPECT_PRODUCT_FIELDS: &str = "Products_inspect_product_fields";

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            LIST_PRODUCTS,
            "List the top N products, optionally filtered by status and sorted.",
        )
        .with_parameter(params::top(DEFAULT_TOP))
        .with_parameter(params::status(
            "0 = active, 1 = retired, 2 = draft, 3 = under revision",
        ))
        .with_parameter(params::sort_by())
        .with_parameter(params::sort_direction()),
        ToolDefinition::new(GET_PRODUCT, "Retrieve a single product by its ID.")
            .with_parameter(params::id("product_id", "GUID of the product"))
            .with_parameter(params::select()),
        ToolDefinition::new(INSPECT_PRODUCT_FIELDS, "Return the columns of a product record."),
    ]
}

pub struct ProductsProvider {
    products: ProductsUseCase,
}

impl ProductsProvider {
    pub fn new(data: Arc<dyn DataServicePort>) -> Self {
        Self {
            products: ProductsUseCase::new(data),
        }
    }

    async fn run(&self, call: &ToolCall) -> CallResult {
        let output = match call.tool_name.as_str() {
            LIST_PRODUCTS => {
                let filter: ListProductsFilter = args::decode(call)?;
                args::records(self.products.list_products(&filter).await?)
            }
            GET_PRODUCT => {
                let id = args::required_str(call, "product_id")?;
                let select = args::optional_str(call, "select");
                args::record(self.products.get_product(id, select).await?)
            }
            INSPECT_PRODUCT_FIELDS => args::fields(self.products.inspect_product_fields().await?),
            other => return Err(ProviderError::ToolNotFound(other.to_string()).into()),
        };
        Ok(output)
    }
}

#[async_trait]
impl ToolProvider for ProductsProvider {
    fn id(&self) -> &str {
        "products"
    }

    fn display_name(&self) -> &str {
        "Products"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        definitions()
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        args::finish(call, self.run(call).await)
    }
}
