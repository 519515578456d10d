//! Infrastructure layer for sales-dataverse
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the authenticated data service client,
//! configuration file loading and the CRM tool providers.

pub mod config;
pub mod dataverse;
pub mod tools;

// Re-export commonly used types
pub use config::{
    AuthMethod, ConfigLoader, ConfigValidationError, FileAuthConfig, FileConfig,
    FileDataverseConfig, FileOutputConfig, FileServerConfig,
};
pub use dataverse::{
    AccessToken, AuthError, AzureDeveloperCli, DataverseClient, StaticToken, TokenSource,
    token_source,
};
pub use tools::{JsonSchemaToolConverter, ToolRegistry, default_registry, tool_catalog};
