//! Use cases
//!
//! Application-level operations that orchestrate domain logic: one use case
//! per entity module, plus the deal summary, fuzzy search and manifest
//! generation they share.

pub mod accounts;
pub mod deal_summary;
pub mod generate_manifest;
pub mod opportunities;
pub mod orders;
pub mod products;
pub mod records;
pub mod search;
pub mod users;
