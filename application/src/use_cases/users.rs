//! System user operations

use super::records::{RecordsUseCase, UseCaseError};
use crate::ports::data_service::DataServicePort;
use dataverse_domain::crm::filters::fields;
use dataverse_domain::{EntitySet, FilterClause, ODataQuery, Record, RecordKey};
use std::sync::Arc;

pub struct UsersUseCase {
    records: RecordsUseCase,
}

impl UsersUseCase {
    pub fn new(data: Arc<dyn DataServicePort>) -> Self {
        Self {
            records: RecordsUseCase::new(data),
        }
    }

    pub async fn list_users(&self, top: u32) -> Result<Vec<Record>, UseCaseError> {
        self.records.list(EntitySet::SystemUsers, top).await
    }

    pub async fn get_user(
        &self,
        user_id: &str,
        select: Option<&str>,
    ) -> Result<Record, UseCaseError> {
        self.records
            .get(EntitySet::SystemUsers, &RecordKey::id(user_id), select)
            .await
    }

    /// Users whose full name contains `name`.
    pub async fn get_users_by_name(&self, name: &str) -> Result<Vec<Record>, UseCaseError> {
        let query = ODataQuery::new().filter(FilterClause::contains(fields::FULL_NAME, name));
        self.records.find(EntitySet::SystemUsers, &query).await
    }

    /// Users whose manager is `manager` (a user GUID).
    pub async fn get_direct_reports(&self, manager: &str) -> Result<Vec<Record>, UseCaseError> {
        let query =
            ODataQuery::new().filter(FilterClause::eq_id(fields::PARENT_SYSTEM_USER, manager));
        self.records.find(EntitySet::SystemUsers, &query).await
    }

    pub async fn get_business_unit_by_id(
        &self,
        business_unit_id: &str,
    ) -> Result<Record, UseCaseError> {
        self.records
            .get(EntitySet::BusinessUnits, &RecordKey::id(business_unit_id), None)
            .await
    }

    pub async fn inspect_user_fields(&self) -> Result<Vec<String>, UseCaseError> {
        self.records.inspect_fields(EntitySet::SystemUsers).await
    }
}
