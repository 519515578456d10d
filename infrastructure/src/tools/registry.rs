//! Tool Registry
//!
//! The [`ToolRegistry`] aggregates the entity providers and implements
//! [`ToolExecutorPort`]. Every call goes through the same pipeline:
//!
//! 1. Resolve the name (canonical `Accounts_list_accounts`, or the legacy
//!    `AccountsPlugin_list_accounts` alias). Unknown names fail with `NOT_FOUND`.
//! 2. Validate arguments against the descriptor (missing required, unknown
//!    or mistyped parameters fail with `INVALID_ARGUMENT`, no request is made).
//! 3. Route to the owning provider and attach the elapsed time.
//!
//! # Usage
//!
//! ```ignore
//! let registry = ToolRegistry::new()
//!     .register(AccountsProvider::new(data.clone(), DEFAULT_SEARCH_PATH))?
//!     .register(StatusProvider)?;
//!
//! let call = ToolCall::new("Accounts_list_accounts").with_arg("top", 3);
//! let result = registry.execute(&call).await;
//! ```
//!
//! Tool names are unique across providers; registering a provider that
//! declares an existing name fails with [`ProviderError::DuplicateTool`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use dataverse_application::ports::tool_executor::ToolExecutorPort;
use dataverse_domain::tool::{
    entities::{ToolCall, ToolSpec},
    provider::{ProviderError, ToolProvider},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
use tracing::{debug, warn};

/// Legacy manifest name of a tool: `Accounts_list_accounts` -> `AccountsPlugin_list_accounts`.
///
/// Tools without a capitalized entity prefix (e.g. `get_server_status`) have none.
pub fn legacy_alias(tool_name: &str) -> Option<String> {
    let (entity, operation) = tool_name.split_once('_')?;
    entity
        .starts_with(|c: char| c.is_ascii_uppercase())
        .then(|| format!("{}Plugin_{}", entity, operation))
}

/// Tool registry that aggregates the entity providers
pub struct ToolRegistry {
    /// Registered providers
    providers: Vec<Arc<dyn ToolProvider>>,
    /// Canonical tool name -> provider ID
    tool_mapping: HashMap<String, String>,
    /// Merged tool specification, aliases included
    tool_spec: ToolSpec,
    validator: DefaultToolValidator,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            tool_mapping: HashMap::new(),
            tool_spec: ToolSpec::new(),
            validator: DefaultToolValidator,
        }
    }

    /// Register a tool provider
    pub fn register<P: ToolProvider + 'static>(self, provider: P) -> Result<Self, ProviderError> {
        self.register_arc(Arc::new(provider))
    }

    /// Register a tool provider (Arc version)
    pub fn register_arc(mut self, provider: Arc<dyn ToolProvider>) -> Result<Self, ProviderError> {
        let tools = provider.tools();

        if let Some((tool, first)) = tools
            .iter()
            .find_map(|t| self.tool_mapping.get(&t.name).map(|owner| (t, owner)))
        {
            return Err(ProviderError::DuplicateTool {
                name: tool.name.clone(),
                first: first.clone(),
                second: provider.id().to_string(),
            });
        }

        let mut tool_spec = std::mem::take(&mut self.tool_spec);
        for tool in tools {
            debug!(tool = %tool.name, provider = provider.id(), "Registered tool");
            self.tool_mapping
                .insert(tool.name.clone(), provider.id().to_string());
            if let Some(alias) = legacy_alias(&tool.name) {
                tool_spec = tool_spec.register_alias(alias, tool.name.clone());
            }
            tool_spec = tool_spec.register(tool);
        }
        self.tool_spec = tool_spec;
        self.providers.push(provider);

        Ok(self)
    }

    /// Get the provider for a canonical tool name
    fn provider_for(&self, tool_name: &str) -> Option<&Arc<dyn ToolProvider>> {
        let provider_id = self.tool_mapping.get(tool_name)?;
        self.providers.iter().find(|p| p.id() == provider_id)
    }

    /// Get a list of registered provider IDs
    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    /// Get statistics about registered tools
    pub fn stats(&self) -> RegistryStats {
        let mut tools_per_provider = HashMap::new();
        for provider_id in self.tool_mapping.values() {
            *tools_per_provider.entry(provider_id.clone()).or_insert(0) += 1;
        }

        RegistryStats {
            total_providers: self.providers.len(),
            total_tools: self.tool_mapping.len(),
            tools_per_provider,
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the registry
#[derive(Debug, Clone)]
pub struct RegistryStats {
    pub total_providers: usize,
    pub total_tools: usize,
    pub tools_per_provider: HashMap<String, usize>,
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let started = Instant::now();

        let Some(definition) = self.tool_spec.get_resolved(&call.tool_name) else {
            warn!(tool = %call.tool_name, "Unknown tool");
            return ToolResult::failure(
                &call.tool_name,
                ToolError::not_found(format!("Tool not found: {}", call.tool_name)),
            );
        };

        if let Err(e) = self.validator.validate(call, definition) {
            warn!(tool = %definition.name, error = %e, "Rejected tool call");
            return ToolResult::failure(&definition.name, ToolError::invalid_argument(e));
        }

        let Some(provider) = self.provider_for(&definition.name) else {
            return ToolResult::failure(&definition.name, ToolError::not_found(&definition.name));
        };

        let routed = call.renamed(&definition.name);
        debug!(tool = %routed.tool_name, provider = provider.id(), "Executing tool");
        let result = provider
            .execute(&routed)
            .await
            .with_duration(started.elapsed().as_millis() as u64);

        match result.error() {
            None => debug!(
                tool = %result.tool_name,
                duration_ms = ?result.metadata.duration_ms,
                records = ?result.metadata.record_count,
                "Tool succeeded"
            ),
            Some(error) => warn!(tool = %result.tool_name, error = %error, "Tool failed"),
        }

        result
    }
}
