//! Opportunity operations

use super::records::{RecordsUseCase, UseCaseError};
use crate::ports::data_service::DataServicePort;
use dataverse_domain::crm::filters::fields;
use dataverse_domain::{
    EntitySet, FilterClause, ListOpportunitiesFilter, ODataQuery, Record, RecordKey,
};
use std::sync::Arc;

pub struct OpportunitiesUseCase {
    records: RecordsUseCase,
}

impl OpportunitiesUseCase {
    pub fn new(data: Arc<dyn DataServicePort>) -> Self {
        Self {
            records: RecordsUseCase::new(data),
        }
    }

    pub async fn list_opportunities(
        &self,
        filter: &ListOpportunitiesFilter,
    ) -> Result<Vec<Record>, UseCaseError> {
        self.records
            .find(EntitySet::Opportunities, &filter.to_query())
            .await
    }

    pub async fn get_opportunity(
        &self,
        opportunity_id: &str,
        select: Option<&str>,
    ) -> Result<Record, UseCaseError> {
        self.records
            .get(EntitySet::Opportunities, &RecordKey::id(opportunity_id), select)
            .await
    }

    /// All opportunities owned by one user, unpaged.
    pub async fn list_opportunities_by_owner(
        &self,
        user_id: &str,
    ) -> Result<Vec<Record>, UseCaseError> {
        let query = ODataQuery::new().filter(FilterClause::eq_id(fields::OWNER, user_id));
        self.records.find(EntitySet::Opportunities, &query).await
    }

    pub async fn inspect_opportunity_fields(&self) -> Result<Vec<String>, UseCaseError> {
        self.records.inspect_fields(EntitySet::Opportunities).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::data_service::mock::MockDataService;

    #[tokio::test]
    async fn test_list_opportunities_top_only() {
        let mock = Arc::new(MockDataService::new());
        let use_case = OpportunitiesUseCase::new(mock.clone());

        let filter = ListOpportunitiesFilter {
            top: 5,
            ..Default::default()
        };
        use_case.list_opportunities(&filter).await.unwrap();

        assert_eq!(mock.requests(), vec!["GET opportunities?$top=5"]);
    }

    #[tokio::test]
    async fn test_list_opportunities_by_owner() {
        let mock = Arc::new(MockDataService::new());
        let use_case = OpportunitiesUseCase::new(mock.clone());

        use_case.list_opportunities_by_owner("u-7").await.unwrap();

        assert_eq!(
            mock.requests(),
            vec!["GET opportunities?$filter=_ownerid_value eq u-7"]
        );
    }
}
