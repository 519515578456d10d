//! Tool provider abstraction
//!
//! A [`ToolProvider`] owns the tools of one business entity (accounts,
//! opportunities, ...) and executes calls addressed to them. The registry
//! aggregates providers and routes each call to its owner:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ToolRegistry                            │
//! │  (merges descriptors, resolves aliases, routes by name)     │
//! └─────────────────────────────────────────────────────────────┘
//!        │             │              │             │
//!        ▼             ▼              ▼             ▼
//!   ┌──────────┐ ┌───────────────┐ ┌──────────┐ ┌──────────┐
//!   │ Accounts │ │ Opportunities │ │  Orders  │ │  Status  │ ...
//!   └──────────┘ └───────────────┘ └──────────┘ └──────────┘
//! ```
//!
//! Tool tables are static: a provider returns the same descriptors for its
//! whole lifetime.

use async_trait::async_trait;
use thiserror::Error;

use super::entities::{ToolCall, ToolDefinition};
use super::value_objects::ToolResult;

/// Error type for tool provider operations
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Tool not found in this provider
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Two providers declare the same tool name
    #[error("Tool '{name}' is declared by both '{first}' and '{second}'")]
    DuplicateTool {
        name: String,
        first: String,
        second: String,
    },

    /// An argument could not be decoded into the operation's input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Source of tools for one business entity
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Unique identifier for this provider
    ///
    /// Examples: "accounts", "orders", "status"
    fn id(&self) -> &str;

    /// Display name for user-facing output
    fn display_name(&self) -> &str;

    /// Static descriptor table of this provider
    fn tools(&self) -> Vec<ToolDefinition>;

    /// Execute a tool call
    ///
    /// The tool_name in the call must be one of the names returned by
    /// `tools()`; arguments have already been validated.
    async fn execute(&self, call: &ToolCall) -> ToolResult;

    /// Check if this provider has a specific tool
    fn has_tool(&self, tool_name: &str) -> bool {
        self.tools().iter().any(|t| t.name == tool_name)
    }
}
