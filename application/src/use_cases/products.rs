//! Product operations

use super::records::{RecordsUseCase, UseCaseError};
use crate::ports::data_service::DataServicePort;
use dataverse_domain::{EntitySet, ListProductsFilter, Record, RecordKey};
use std::sync::Arc;

pub struct ProductsUseCase {
    records: RecordsUseCase,
}

impl ProductsUseCase {
    pub fn new(data: Arc<dyn DataServicePort>) -> Self {
        Self {
            records: RecordsUseCase::new(data),
        }
    }

    pub async fn list_products(
        &self,
        filter: &ListProductsFilter,
    ) -> Result<Vec<Record>, UseCaseError> {
        self.records
            .find(EntitySet::Products, &filter.to_query())
            .await
    }

    pub async fn get_product(
        &self,
        product_id: &str,
        select: Option<&str>,
    ) -> Result<Record, UseCaseError> {
        self.records
            .get(EntitySet::Products, &RecordKey::id(product_id), select)
            .await
    }

    pub async fn inspect_product_fields(&self) -> Result<Vec<String>, UseCaseError> {
        self.records.inspect_fields(EntitySet::Products).await
    }
}
