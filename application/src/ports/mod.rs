//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod data_service;
pub mod tool_executor;
pub mod tool_schema;
