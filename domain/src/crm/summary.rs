//! Account deal summary
//!
//! Opportunities of an account are partitioned into three buckets by
//! `statecode`. Each bucket is aggregated remotely into a single row with a
//! record count and a summed monetary value, and the rows are merged into one
//! flat summary:
//!
//! | Bucket | `statecode` | Summed field | Keys |
//! |--------|-------------|--------------|------|
//! | Open | 0 | `estimatedvalue` | `open_deal_count`, `open_revenue` |
//! | Won | 1 | `actualvalue` | `won_deal_count`, `won_revenue` |
//! | Lost | 2 | `actualvalue` | `lost_deal_count`, `lost_revenue` |

use super::filters::fields;
use super::record::Record;
use crate::odata::{Aggregation, FilterClause, ODataQuery};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opportunity outcome class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealBucket {
    Open,
    Won,
    Lost,
}

impl DealBucket {
    pub const ALL: [DealBucket; 3] = [DealBucket::Open, DealBucket::Won, DealBucket::Lost];

    pub fn status_code(&self) -> i64 {
        match self {
            DealBucket::Open => 0,
            DealBucket::Won => 1,
            DealBucket::Lost => 2,
        }
    }

    /// Monetary field summed for this bucket
    pub fn value_field(&self) -> &'static str {
        match self {
            DealBucket::Open => fields::ESTIMATED_VALUE,
            DealBucket::Won | DealBucket::Lost => fields::ACTUAL_VALUE,
        }
    }

    pub fn count_key(&self) -> &'static str {
        match self {
            DealBucket::Open => "open_deal_count",
            DealBucket::Won => "won_deal_count",
            DealBucket::Lost => "lost_deal_count",
        }
    }

    pub fn revenue_key(&self) -> &'static str {
        match self {
            DealBucket::Open => "open_revenue",
            DealBucket::Won => "won_revenue",
            DealBucket::Lost => "lost_revenue",
        }
    }

    /// `$apply` query aggregating this bucket for one account.
    pub fn query(&self, account_id: &str) -> ODataQuery {
        let aggregation = Aggregation::new()
            .filter(FilterClause::eq_id(fields::PARENT_ACCOUNT, account_id))
            .filter(FilterClause::eq_code(fields::STATE_CODE, self.status_code()))
            .count_as(self.count_key())
            .sum_as(self.value_field(), self.revenue_key());
        ODataQuery::new().apply(&aggregation)
    }
}

/// Merged summary, seeded with zero for every bucket key.
#[derive(Debug, Clone, PartialEq)]
pub struct DealSummary {
    record: Record,
}

impl DealSummary {
    pub fn new() -> Self {
        let mut record = Record::new();
        for bucket in DealBucket::ALL {
            record.insert(bucket.revenue_key().to_string(), Value::from(0));
            record.insert(bucket.count_key().to_string(), Value::from(0));
        }
        Self { record }
    }

    /// Merge one bucket's aggregation result.
    ///
    /// Only the first row is considered and only this bucket's keys are
    /// copied. An empty result or a null sum leaves the zero defaults.
    pub fn merge(&mut self, bucket: DealBucket, rows: &[Record]) {
        let Some(row) = rows.first() else {
            return;
        };
        for key in [bucket.count_key(), bucket.revenue_key()] {
            match row.get(key) {
                Some(Value::Null) | None => {}
                Some(value) => {
                    self.record.insert(key.to_string(), value.clone());
                }
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    pub fn as_record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }
}

impl Default for DealSummary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_new_summary_is_zeroed() {
        let summary = DealSummary::new();
        assert_eq!(
            Value::Object(summary.into_record()),
            json!({
                "open_revenue": 0, "open_deal_count": 0,
                "won_revenue": 0, "won_deal_count": 0,
                "lost_revenue": 0, "lost_deal_count": 0
            })
        );
    }

    #[test]
    fn test_merge_open_only() {
        let mut summary = DealSummary::new();
        summary.merge(
            DealBucket::Open,
            &[row(json!({"open_deal_count": 3, "open_revenue": 1500}))],
        );
        summary.merge(DealBucket::Won, &[]);
        summary.merge(DealBucket::Lost, &[]);

        assert_eq!(
            Value::Object(summary.into_record()),
            json!({
                "open_revenue": 1500, "open_deal_count": 3,
                "won_revenue": 0, "won_deal_count": 0,
                "lost_revenue": 0, "lost_deal_count": 0
            })
        );
    }

    #[test]
    fn test_merge_ignores_null_sum_and_foreign_keys() {
        let mut summary = DealSummary::new();
        summary.merge(
            DealBucket::Won,
            &[row(json!({
                "won_deal_count": 0,
                "won_revenue": null,
                "@odata.etag": "W/\"1\"",
                "open_revenue": 99
            }))],
        );
        assert_eq!(summary.get("won_revenue"), Some(&json!(0)));
        assert_eq!(summary.get("open_revenue"), Some(&json!(0)));
        assert!(summary.get("@odata.etag").is_none());
    }

    #[test]
    fn test_bucket_query() {
        assert_eq!(
            DealBucket::Lost.query("acc-1").to_query_string(),
            "$apply=filter(_parentaccountid_value eq acc-1 and statecode eq 2)/\
             aggregate($count as lost_deal_count, actualvalue with sum as lost_revenue)"
        );
        assert!(
            DealBucket::Open
                .query("acc-1")
                .to_query_string()
                .contains("estimatedvalue with sum as open_revenue")
        );
    }
}
