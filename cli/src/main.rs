//! CLI entrypoint for sales-dataverse
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use dataverse_application::{GenerateManifestInput, GenerateManifestUseCase, ToolExecutorPort};
use dataverse_domain::{OutputFormat, ToolCall};
use dataverse_infrastructure::{
    ConfigLoader, DataverseClient, FileConfig, JsonSchemaToolConverter, default_registry,
    token_source, tool_catalog,
};
use dataverse_presentation::{Cli, Command, ConsoleFormatter, parse_call_arguments};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting sales-dataverse");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;

    let issues: Vec<String> = config.validate().iter().map(ToString::to_string).collect();
    for issue in &issues {
        warn!(%issue, "Configuration issue");
    }

    let format = config.output.resolve_format(cli.format.map(Into::into));
    if !config.output.color_enabled(cli.no_color) {
        colored::control::set_override(false);
    }

    match cli.command {
        Command::Tools { aliases } => {
            let spec = tool_catalog();
            let output = match format {
                OutputFormat::Pretty => ConsoleFormatter::format_tools(&spec, aliases),
                OutputFormat::Json => ConsoleFormatter::format_tools_json(&spec),
            };
            println!("{}", output);
        }

        Command::Call { tool, args, arg } => {
            if !issues.is_empty() {
                bail!("Invalid configuration:\n  {}", issues.join("\n  "));
            }
            let arguments = parse_call_arguments(args.as_deref(), &arg)?;
            let registry = connect(&config).await?;

            let call = ToolCall::new(tool).with_args(arguments);
            let result = registry.execute(&call).await;

            let output = match format {
                OutputFormat::Pretty => ConsoleFormatter::format_result(&result),
                OutputFormat::Json => ConsoleFormatter::format_result_json(&result),
            };
            println!("{}", output);

            if !result.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Command::Manifest {
            output,
            name,
            stdout,
        } => {
            let input = GenerateManifestInput {
                name: name.unwrap_or_else(|| config.server.name.clone()),
                schema_version: config.server.schema_version.clone(),
            };
            let manifest = GenerateManifestUseCase::new(Arc::new(JsonSchemaToolConverter))
                .execute(&tool_catalog(), input);
            let json = serde_json::to_string_pretty(&manifest)?;

            if stdout {
                println!("{}", json);
            } else {
                let path = output.unwrap_or_else(|| PathBuf::from(&config.server.manifest_path));
                std::fs::write(&path, format!("{json}\n"))
                    .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
                info!(path = %path.display(), tools = manifest.tools.len(), "Wrote manifest");
                println!(
                    "Wrote {} tools to {}",
                    manifest.tools.len(),
                    path.display()
                );
            }
        }

        Command::Config => {
            let output = match format {
                OutputFormat::Pretty => ConsoleFormatter::format_config(
                    &ConfigLoader::config_sources(),
                    &toml::to_string_pretty(&config)?,
                    &issues,
                ),
                OutputFormat::Json => serde_json::to_string_pretty(&config)?,
            };
            println!("{}", output);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Authenticate against the configured endpoint and bind every tool to it.
async fn connect(config: &FileConfig) -> Result<impl ToolExecutorPort> {
    let base_url = config.base_url()?;
    let source = token_source(&config.auth)?;
    let timeout = Duration::from_secs(config.dataverse.timeout_seconds);

    let client = DataverseClient::connect(base_url, timeout, source)
        .await
        .with_context(|| format!("Failed to connect to {base_url}"))?;
    let registry = default_registry(Arc::new(client), &config.dataverse.search_path)?;

    let stats = registry.stats();
    info!(
        providers = stats.total_providers,
        tools = stats.total_tools,
        "Tool registry ready"
    );
    Ok(registry)
}
