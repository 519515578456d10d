//! Tool domain module
//!
//! Defines how CRM operations are exposed as callable **tools**. Every tool
//! is described by a [`ToolDefinition`] (name, title, typed parameters),
//! invoked through a [`ToolCall`] and answered with a [`ToolResult`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (registry)   │    │ (invocation) │    │ (output)     │
//! └──────┬───────┘    └──────────────┘    └──────────────┘
//!        │
//!        ├─ aliases: "AccountsPlugin_list_accounts" → "Accounts_list_accounts"
//!        └─ tools:   "Accounts_list_accounts" → ToolDefinition
//! ```
//!
//! Callable names follow `<Entity>_<operation>`. Older manifests published
//! the same operations as `<Entity>Plugin_<operation>`; those names stay
//! resolvable through the alias table of [`ToolSpec`].
//!
//! # Key Types
//!
//! - [`ToolSpec`]: registry of available tools + alias mappings
//! - [`ToolDefinition`]: descriptor for a single tool
//! - [`ToolValidator`]: pure parameter validation
//! - [`ToolProvider`]: one entity module's tools and their execution
//! - [`ToolManifest`]: serialized description of all tools

pub mod entities;
pub mod manifest;
pub mod provider;
pub mod traits;
pub mod value_objects;

pub use entities::{ParamType, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use manifest::{ManifestTool, ToolManifest};
pub use provider::{ProviderError, ToolProvider};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult, ToolResultMetadata};
