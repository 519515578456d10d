//! Sales order tools

use async_trait::async_trait;
use dataverse_application::{DataServicePort, OrdersUseCase};
use dataverse_domain::tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter},
    provider::{ProviderError, ToolProvider},
    value_objects::ToolResult,
};
use dataverse_domain::DEFAULT_TOP;
use std::sync::Arc;

use super::args::{self, CallResult, params};

pub const LIST_ORDERS: &str = "Orders_list_orders";
pub const GET_ORDER: &str = "Orders_get_order";
pub const GET_ORDERS_BY_ACCOUNT: &str = "Orders_get_orders_by_account";
pub const INSPECT_ORDER_FIELDS: &str = "Orders_inspect_order_fields";

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(LIST_ORDERS, "List the top N sales orders.")
            .with_parameter(params::top(DEFAULT_TOP)),
        ToolDefinition::new(
            GET_ORDER,
            "Retrieve a single sales order by its GUID or by its order number \
             (e.g. ORD-01001). One of the two must be provided; the GUID wins.",
        )
        .with_parameter(ToolParameter::optional(
            "order_id",
            "GUID of the order",
            ParamType::String,
        ))
        .with_parameter(ToolParameter::optional(
            "order_number",
            "Order number, e.g. ORD-01001",
            ParamType::String,
        ))
        .with_parameter(params::select()),
        ToolDefinition::new(
            GET_ORDERS_BY_ACCOUNT,
            "Retrieve the sales orders of an account.",
        )
        .with_parameter(params::id("account_id", "GUID of the customer account")),
        ToolDefinition::new(INSPECT_ORDER_FIELDS, "Return the columns of a sales order record."),
    ]
}

pub struct OrdersProvider {
    orders: OrdersUseCase,
}

impl OrdersProvider {
    pub fn new(data: Arc<dyn DataServicePort>) -> Self {
        Self {
            orders: OrdersUseCase::new(data),
        }
    }

    async fn run(&self, call: &ToolCall) -> CallResult {
        let output = match call.tool_name.as_str() {
            LIST_ORDERS => {
                let top = args::top(call, DEFAULT_TOP)?;
                args::records(self.orders.list_orders(top).await?)
            }
            GET_ORDER => {
                let order = self
                    .orders
                    .get_order(
                        args::optional_str(call, "order_id"),
                        args::optional_str(call, "order_number"),
                        args::optional_str(call, "select"),
                    )
                    .await?;
                args::record(order)
            }
            GET_ORDERS_BY_ACCOUNT => {
                let id = args::required_str(call, "account_id")?;
                args::records(self.orders.get_orders_by_account(id).await?)
            }
            INSPECT_ORDER_FIELDS => args::fields(self.orders.inspect_order_fields().await?),
            other => return Err(ProviderError::ToolNotFound(other.to_string()).into()),
        };
        Ok(output)
    }
}

#[async_trait]
impl ToolProvider for OrdersProvider {
    fn id(&self) -> &str {
        "orders"
    }

    fn display_name(&self) -> &str {
        "Orders"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        definitions()
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        args::finish(call, self.run(call).await)
    }
}
