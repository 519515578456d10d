//! CRM domain: entity sets, records and per-entity query assembly

pub mod entity;
pub mod filters;
pub mod record;
pub mod summary;

pub use entity::EntitySet;
pub use filters::{
    DEFAULT_SEARCH_TOP, DEFAULT_TOP, ListAccountsFilter, ListOpportunitiesFilter,
    ListProductsFilter, order_key, related_records,
};
pub use record::{Record, RecordKey, field_names};
pub use summary::{DealBucket, DealSummary};
