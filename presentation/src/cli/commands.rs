//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored output
    Pretty,
    /// Raw JSON
    Json,
}

impl From<OutputFormat> for dataverse_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Pretty => dataverse_domain::OutputFormat::Pretty,
            OutputFormat::Json => dataverse_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for sales-dataverse
#[derive(Parser, Debug)]
#[command(name = "sales-dataverse")]
#[command(author, version, about = "CRM record tools over a Dataverse OData endpoint")]
#[command(long_about = r#"
Sales Dataverse exposes CRM records (accounts, opportunities, products,
orders, users, leads, quotes, ...) as callable tools and writes the tool
manifest consumed by agent hosts.

Configuration files are loaded from (in priority order):
1. --config <path>                              Explicit config file
2. ./sales-dataverse.toml                       Project-level config
3. ~/.config/sales-dataverse/config.toml        Global config
Environment: DATAVERSE_URL, SALES_DATAVERSE_<SECTION>__<KEY>

Example:
  sales-dataverse tools
  sales-dataverse call Accounts_list_accounts -a top=3 -a region=NAR
  sales-dataverse call Orders_get_order --args '{"order_number": "ORD-01001"}'
  sales-dataverse manifest --output .mcp.json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Output format (overrides [output] format)
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the available tools and their parameters
    Tools {
        /// Also show the legacy `<Entity>Plugin_<operation>` names
        #[arg(long)]
        aliases: bool,
    },

    /// Invoke a tool against the data service
    Call {
        /// Tool name, e.g. Accounts_list_accounts
        tool: String,

        /// Arguments as a JSON object
        #[arg(long, value_name = "JSON")]
        args: Option<String>,

        /// Single argument; the value is parsed as JSON when possible
        #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE")]
        arg: Vec<String>,
    },

    /// Write the tool manifest
    Manifest {
        /// Destination file (defaults to [server] manifest_path)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Server name advertised in the manifest
        #[arg(long)]
        name: Option<String>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Show configuration file locations and the effective configuration
    Config,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("--args must be a JSON object: {0}")]
    InvalidJson(String),

    #[error("--args must be a JSON object, got {0}")]
    NotAnObject(String),

    #[error("argument '{0}' must look like key=value")]
    MalformedPair(String),
}

/// Merge `--args` and `-a key=value` pairs into one argument object.
///
/// Pairs are applied after `--args`, so they win on conflicting keys.
/// A pair value that parses as JSON (`3`, `true`, `"123"`) keeps that type;
/// anything else is taken as a plain string.
pub fn parse_call_arguments(
    json: Option<&str>,
    pairs: &[String],
) -> Result<Map<String, Value>, ArgumentError> {
    let mut arguments = match json {
        None => Map::new(),
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(other) => return Err(ArgumentError::NotAnObject(other.to_string())),
            Err(e) => return Err(ArgumentError::InvalidJson(e.to_string())),
        },
    };

    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            return Err(ArgumentError::MalformedPair(pair.clone()));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ArgumentError::MalformedPair(pair.clone()));
        }
        let value =
            serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        arguments.insert(key.to_string(), value);
    }

    Ok(arguments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_call_command() {
        let cli = Cli::parse_from([
            "sales-dataverse",
            "-vv",
            "call",
            "Accounts_list_accounts",
            "-a",
            "top=3",
            "--format",
            "json",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Command::Call { tool, arg, args } => {
                assert_eq!(tool, "Accounts_list_accounts");
                assert_eq!(arg, vec!["top=3"]);
                assert!(args.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_call_arguments() {
        let args = parse_call_arguments(
            Some(r#"{"top": 5, "region": "APAC"}"#),
            &["region=NAR".to_string(), "status=0".to_string()],
        )
        .unwrap();

        assert_eq!(args["top"], json!(5));
        assert_eq!(args["region"], json!("NAR"));
        assert_eq!(args["status"], json!(0));
    }

    #[test]
    fn test_parse_call_arguments_quoted_number_stays_string() {
        let args = parse_call_arguments(None, &[r#"order_number="1001""#.to_string()]).unwrap();
        assert_eq!(args["order_number"], json!("1001"));
    }

    #[test]
    fn test_parse_call_arguments_errors() {
        assert!(matches!(
            parse_call_arguments(Some("[1]"), &[]),
            Err(ArgumentError::NotAnObject(_))
        ));
        assert!(matches!(
            parse_call_arguments(Some("{"), &[]),
            Err(ArgumentError::InvalidJson(_))
        ));
        assert_eq!(
            parse_call_arguments(None, &["top".to_string()]),
            Err(ArgumentError::MalformedPair("top".to_string()))
        );
    }
}
