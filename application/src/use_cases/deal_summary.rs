//! Account deal summary use case
//!
//! Issues the open/won/lost aggregation queries concurrently and merges
//! their rows into one [`DealSummary`]. Any failing sub-query fails the whole
//! summary; an empty bucket keeps its zero defaults.

use super::records::UseCaseError;
use crate::ports::data_service::DataServicePort;
use dataverse_domain::{DealBucket, DealSummary, EntitySet, Record};
use std::sync::Arc;
use tracing::debug;

pub struct DealSummaryUseCase {
    data: Arc<dyn DataServicePort>,
}

impl DealSummaryUseCase {
    pub fn new(data: Arc<dyn DataServicePort>) -> Self {
        Self { data }
    }

    pub async fn execute(&self, account_id: &str) -> Result<Record, UseCaseError> {
        let [open, won, lost] = DealBucket::ALL.map(|bucket| bucket.query(account_id));
        debug!(account_id, "Aggregating deal buckets");

        let (open_rows, won_rows, lost_rows) = tokio::try_join!(
            self.data.query(EntitySet::Opportunities, &open),
            self.data.query(EntitySet::Opportunities, &won),
            self.data.query(EntitySet::Opportunities, &lost),
        )?;

        let mut summary = DealSummary::new();
        summary.merge(DealBucket::Open, &open_rows);
        summary.merge(DealBucket::Won, &won_rows);
        summary.merge(DealBucket::Lost, &lost_rows);
        Ok(summary.into_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::data_service::DataServiceError;
    use crate::ports::data_service::mock::MockDataService;
    use serde_json::{Value, json};

    fn request(bucket: DealBucket) -> String {
        format!("GET opportunities?{}", bucket.query("acc-1"))
    }

    #[tokio::test]
    async fn test_summary_with_open_deals_only() {
        let mock = Arc::new(MockDataService::new().respond(
            request(DealBucket::Open),
            json!([{"open_deal_count": 3, "open_revenue": 1500}]),
        ));
        let use_case = DealSummaryUseCase::new(mock.clone());

        let summary = use_case.execute("acc-1").await.unwrap();

        assert_eq!(
            Value::Object(summary),
            json!({
                "open_revenue": 1500, "open_deal_count": 3,
                "won_revenue": 0, "won_deal_count": 0,
                "lost_revenue": 0, "lost_deal_count": 0
            })
        );
        assert_eq!(mock.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_summary_all_buckets() {
        let mock = Arc::new(
            MockDataService::new()
                .respond(
                    request(DealBucket::Open),
                    json!([{"open_deal_count": 2, "open_revenue": 700.5}]),
                )
                .respond(
                    request(DealBucket::Won),
                    json!([{"won_deal_count": 4, "won_revenue": 12000}]),
                )
                .respond(
                    request(DealBucket::Lost),
                    json!([{"lost_deal_count": 1, "lost_revenue": null}]),
                ),
        );
        let summary = DealSummaryUseCase::new(mock).execute("acc-1").await.unwrap();

        assert_eq!(summary["open_revenue"], json!(700.5));
        assert_eq!(summary["won_deal_count"], json!(4));
        assert_eq!(summary["lost_deal_count"], json!(1));
        assert_eq!(summary["lost_revenue"], json!(0));
    }

    #[tokio::test]
    async fn test_transport_error_fails_whole_summary() {
        let mock = Arc::new(
            MockDataService::new()
                .respond(
                    request(DealBucket::Open),
                    json!([{"open_deal_count": 3, "open_revenue": 1500}]),
                )
                .fail(
                    request(DealBucket::Won),
                    DataServiceError::Transport("connection reset".into()),
                ),
        );
        let err = DealSummaryUseCase::new(mock).execute("acc-1").await.unwrap_err();

        assert_eq!(
            err,
            UseCaseError::DataService(DataServiceError::Transport("connection reset".into()))
        );
    }
}
