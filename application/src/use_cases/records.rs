//! Generic record operations
//!
//! List, point lookup and field inspection work the same way for every
//! entity set. Entity modules compose [`RecordsUseCase`] and add their own
//! filters and relationship lookups on top.

use crate::ports::data_service::{DataServiceError, DataServicePort};
use dataverse_domain::{DomainError, EntitySet, ODataQuery, Record, RecordKey, field_names};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while executing a CRM operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UseCaseError {
    /// Rejected locally, before any network call
    #[error(transparent)]
    InvalidInput(#[from] DomainError),

    #[error(transparent)]
    DataService(#[from] DataServiceError),
}

/// Projection for a point lookup: `select=a, b` → `$select=a,b`.
pub(crate) fn select_query(select: Option<&str>) -> Option<ODataQuery> {
    let columns: Vec<&str> = select?
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if columns.is_empty() {
        None
    } else {
        Some(ODataQuery::new().select(columns))
    }
}

/// List / get / inspect over any entity set
#[derive(Clone)]
pub struct RecordsUseCase {
    data: Arc<dyn DataServicePort>,
}

impl RecordsUseCase {
    pub fn new(data: Arc<dyn DataServicePort>) -> Self {
        Self { data }
    }

    /// First `top` records of a table (`$top=N`).
    pub async fn list(&self, table: EntitySet, top: u32) -> Result<Vec<Record>, UseCaseError> {
        self.find(table, &ODataQuery::new().top(top)).await
    }

    /// Records matching an arbitrary query.
    pub async fn find(
        &self,
        table: EntitySet,
        query: &ODataQuery,
    ) -> Result<Vec<Record>, UseCaseError> {
        debug!(table = %table, query = %query, "Querying records");
        Ok(self.data.query(table, query).await?)
    }

    /// Point lookup. A missing record surfaces as the remote 404 unchanged.
    pub async fn get(
        &self,
        table: EntitySet,
        key: &RecordKey,
        select: Option<&str>,
    ) -> Result<Record, UseCaseError> {
        debug!(table = %table, key = %key, "Retrieving record");
        let query = select_query(select);
        Ok(self.data.retrieve(table, key, query.as_ref()).await?)
    }

    /// Column names of one sample record, or `[]` for an empty table.
    pub async fn inspect_fields(&self, table: EntitySet) -> Result<Vec<String>, UseCaseError> {
        let records = self.list(table, 1).await?;
        Ok(records.first().map(field_names).unwrap_or_default())
    }
}
