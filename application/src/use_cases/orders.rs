//! Sales order operations

use super::records::{RecordsUseCase, UseCaseError};
use crate::ports::data_service::DataServicePort;
use dataverse_domain::crm::filters::fields;
use dataverse_domain::{EntitySet, FilterClause, ODataQuery, Record, order_key};
use std::sync::Arc;

pub struct OrdersUseCase {
    records: RecordsUseCase,
}

impl OrdersUseCase {
    pub fn new(data: Arc<dyn DataServicePort>) -> Self {
        Self {
            records: RecordsUseCase::new(data),
        }
    }

    pub async fn list_orders(&self, top: u32) -> Result<Vec<Record>, UseCaseError> {
        self.records.list(EntitySet::SalesOrders, top).await
    }

    /// Lookup by GUID or by order number (e.g. `ORD-01001`).
    ///
    /// Fails before any request when neither identifier is given.
    pub async fn get_order(
        &self,
        order_id: Option<&str>,
        order_number: Option<&str>,
        select: Option<&str>,
    ) -> Result<Record, UseCaseError> {
        let key = order_key(order_id, order_number)?;
        self.records.get(EntitySet::SalesOrders, &key, select).await
    }

    pub async fn get_orders_by_account(
        &self,
        account_id: &str,
    ) -> Result<Vec<Record>, UseCaseError> {
        let query = ODataQuery::new().filter(FilterClause::eq_id(fields::CUSTOMER, account_id));
        self.records.find(EntitySet::SalesOrders, &query).await
    }

    pub async fn inspect_order_fields(&self) -> Result<Vec<String>, UseCaseError> {
        self.records.inspect_fields(EntitySet::SalesOrders).await
    }
}
