//! Domain layer for sales-dataverse
//!
//! This crate contains the pure business logic: OData query assembly, CRM
//! record types and the tool descriptors through which CRM operations are
//! exposed. It performs no I/O.
//!
//! # Core Concepts
//!
//! ## Query translation
//!
//! Optional, typed inputs (region, status, owner, sort, paging) are turned
//! into a correctly escaped and correctly combined OData query string by
//! [`ODataQuery`] and the per-entity filters in [`crm`].
//!
//! ## Deal summary
//!
//! [`DealBucket`] and [`DealSummary`] describe the three aggregation queries
//! over an account's opportunities and how their rows merge into one flat
//! record.
//!
//! ## Tools
//!
//! [`tool`] holds the descriptors, calls, results and manifest types shared
//! by the registry and the manifest generator.

pub mod config;
pub mod core;
pub mod crm;
pub mod odata;
pub mod tool;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use crm::{
    DEFAULT_SEARCH_TOP, DEFAULT_TOP, DealBucket, DealSummary, EntitySet, ListAccountsFilter,
    ListOpportunitiesFilter, ListProductsFilter, Record, RecordKey, field_names, order_key,
    related_records,
};
pub use odata::{Aggregation, FilterClause, ODataQuery, quote};
pub use tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    manifest::{ManifestTool, ToolManifest},
    provider::{ProviderError, ToolProvider},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
