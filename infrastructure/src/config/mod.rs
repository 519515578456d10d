//! Configuration file loading for sales-dataverse
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables (`DATAVERSE_URL`, `SALES_DATAVERSE_*`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./sales-dataverse.toml` or `./.sales-dataverse.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/sales-dataverse/config.toml`
//! 5. Fallback: `~/.config/sales-dataverse/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    AuthMethod, ConfigValidationError, DEFAULT_MANIFEST_PATH, DEFAULT_SEARCH_PATH,
    DEFAULT_TIMEOUT_SECONDS, DEFAULT_TOKEN_ENV, FileAuthConfig, FileConfig, FileDataverseConfig,
    FileOutputConfig, FileServerConfig,
};
pub use loader::ConfigLoader;
