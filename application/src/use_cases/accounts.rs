//! Account operations

use super::deal_summary::DealSummaryUseCase;
use super::records::{RecordsUseCase, UseCaseError};
use super::search::SearchUseCase;
use crate::ports::data_service::{DataServiceError, DataServicePort};
use dataverse_domain::crm::filters::fields;
use dataverse_domain::{EntitySet, ListAccountsFilter, Record, RecordKey, related_records};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub struct AccountsUseCase {
    data: Arc<dyn DataServicePort>,
    records: RecordsUseCase,
    search: SearchUseCase,
    summary: DealSummaryUseCase,
}

impl AccountsUseCase {
    pub fn new(data: Arc<dyn DataServicePort>, search_path: impl Into<String>) -> Self {
        Self {
            records: RecordsUseCase::new(data.clone()),
            search: SearchUseCase::new(data.clone(), search_path),
            summary: DealSummaryUseCase::new(data.clone()),
            data,
        }
    }

    /// Accounts narrowed by region, status and owning business unit.
    pub async fn list_accounts(
        &self,
        filter: &ListAccountsFilter,
    ) -> Result<Vec<Record>, UseCaseError> {
        self.records
            .find(EntitySet::Accounts, &filter.to_query())
            .await
    }

    pub async fn get_account(
        &self,
        account_id: &str,
        select: Option<&str>,
    ) -> Result<Record, UseCaseError> {
        self.records
            .get(EntitySet::Accounts, &RecordKey::id(account_id), select)
            .await
    }

    /// Typo-tolerant search on account names.
    pub async fn search_accounts_by_name(
        &self,
        search_query: &str,
        top: u32,
    ) -> Result<Value, UseCaseError> {
        self.search
            .search(EntitySet::Accounts, search_query, top)
            .await
    }

    /// Opportunities whose parent account is `account_id` (0 = open, 1 = won, 2 = lost).
    pub async fn list_account_opportunities(
        &self,
        account_id: &str,
        status: Option<i64>,
    ) -> Result<Vec<Record>, UseCaseError> {
        let query = related_records(fields::PARENT_ACCOUNT, account_id, status);
        self.records.find(EntitySet::Opportunities, &query).await
    }

    /// Sales orders whose customer is `account_id`
    /// (0 = active, 1 = submitted, 2 = cancelled, 3 = fulfilled, 4 = invoiced).
    pub async fn list_account_orders(
        &self,
        account_id: &str,
        status: Option<i64>,
    ) -> Result<Vec<Record>, UseCaseError> {
        let params = related_records(fields::CUSTOMER, account_id, status).params();
        debug!(account_id, ?status, "Listing account orders");
        let body = self
            .data
            .query_with_params(EntitySet::SalesOrders, &params)
            .await?;
        records_from_body(body)
    }

    pub async fn get_account_deal_summary(&self, account_id: &str) -> Result<Record, UseCaseError> {
        self.summary.execute(account_id).await
    }

    pub async fn inspect_account_fields(&self) -> Result<Vec<String>, UseCaseError> {
        self.records.inspect_fields(EntitySet::Accounts).await
    }
}

/// Records from the `value` array of a collection response body.
fn records_from_body(body: Value) -> Result<Vec<Record>, UseCaseError> {
    match body {
        Value::Object(mut map) => match map.remove("value") {
            Some(Value::Array(rows)) => Ok(rows
                .into_iter()
                .filter_map(|row| match row {
                    Value::Object(record) => Some(record),
                    _ => None,
                })
                .collect()),
            Some(_) | None => Err(DataServiceError::Decode(
                "response has no 'value' array".to_string(),
            )
            .into()),
        },
        _ => Err(DataServiceError::Decode("response is not a JSON object".to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::data_service::mock::MockDataService;
    use crate::use_cases::search::DEFAULT_SEARCH_PATH;
    use serde_json::json;

    fn accounts(mock: MockDataService) -> (Arc<MockDataService>, AccountsUseCase) {
        let mock = Arc::new(mock);
        (mock.clone(), AccountsUseCase::new(mock, DEFAULT_SEARCH_PATH))
    }

    #[tokio::test]
    async fn test_list_accounts_end_to_end() {
        let (mock, accounts) = accounts(MockDataService::new());
        let filter = ListAccountsFilter {
            top: 3,
            region: Some("NAR".into()),
            status: Some(0),
            sort_by: Some("name".into()),
            sort_direction: Some("asc".into()),
            ..Default::default()
        };

        accounts.list_accounts(&filter).await.unwrap();

        assert_eq!(
            mock.requests(),
            vec![
                "GET accounts?$top=3&$filter=cs_accountsalesregion eq 'NAR' and statecode eq 0&$orderby=name asc"
            ]
        );
    }

    #[tokio::test]
    async fn test_list_account_opportunities() {
        let (mock, accounts) = accounts(MockDataService::new());

        accounts.list_account_opportunities("a-1", None).await.unwrap();
        accounts.list_account_opportunities("a-1", Some(1)).await.unwrap();

        assert_eq!(
            mock.requests(),
            vec![
                "GET opportunities?$filter=_parentaccountid_value eq a-1",
                "GET opportunities?$filter=_parentaccountid_value eq a-1 and statecode eq 1",
            ]
        );
    }

    #[tokio::test]
    async fn test_list_account_orders_reads_value_array() {
        let (mock, accounts) = accounts(MockDataService::new().respond(
            "GET salesorders?$filter=_customerid_value eq a-1 and statecode eq 4",
            json!({"@odata.context": "ctx", "value": [{"ordernumber": "ORD-1"}]}),
        ));

        let orders = accounts.list_account_orders("a-1", Some(4)).await.unwrap();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0]["ordernumber"], "ORD-1");
        assert_eq!(mock.requests().len(), 1);
    }

    #[test]
    fn test_records_from_body_without_value() {
        let err = records_from_body(json!({"error": "nope"})).unwrap_err();
        assert!(matches!(
            err,
            UseCaseError::DataService(DataServiceError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let (_, accounts) = accounts(MockDataService::new());
        let err = accounts.get_account("missing", None).await.unwrap_err();
        assert!(matches!(err, UseCaseError::DataService(e) if e.is_not_found()));
    }

    #[tokio::test]
    async fn test_search_accounts_by_name() {
        let (mock, accounts) = accounts(MockDataService::new());
        accounts.search_accounts_by_name("Fabrkam", 3).await.unwrap();
        assert_eq!(mock.requests(), vec!["POST /api/search/v1.0/query"]);
        assert_eq!(mock.payloads()[0]["top"], 3);
    }
}
