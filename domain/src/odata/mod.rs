//! OData query-translation layer
//!
//! Pure string composition, no I/O. Entity-specific filter assembly lives in
//! [`crate::crm::filters`] and builds on the types here.

pub mod aggregate;
pub mod filter;
pub mod query;

pub use aggregate::{AggregateExpr, Aggregation};
pub use filter::{FilterClause, Literal, join_clauses, quote};
pub use query::{ODataQuery, OrderBy};
