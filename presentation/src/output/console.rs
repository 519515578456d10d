//! Console output formatter for tool listings, tool results and configuration

use colored::Colorize;
use dataverse_domain::tool::{
    entities::{ToolDefinition, ToolParameter, ToolSpec},
    value_objects::ToolResult,
};
use serde_json::Value;

/// Formats command output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Tools grouped by entity, with their parameters
    pub fn format_tools(spec: &ToolSpec, show_aliases: bool) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Available Tools ({})", spec.len())));
        output.push('\n');

        let mut current_group = None;
        for tool in spec.sorted() {
            let group = Self::group_of(&tool.name);
            if current_group != Some(group) {
                output.push_str(&Self::section_header(group));
                current_group = Some(group);
            }
            output.push_str(&Self::tool_entry(tool));
            if show_aliases {
                for alias in spec.aliases_of(&tool.name) {
                    output.push_str(&format!("    {} {}\n", "alias:".dimmed(), alias));
                }
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Tool descriptors as a JSON array, sorted by name
    pub fn format_tools_json(spec: &ToolSpec) -> String {
        serde_json::to_string_pretty(&spec.sorted()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Output of one tool call, or its coded error
    pub fn format_result(result: &ToolResult) -> String {
        let mut output = String::new();

        match (result.output(), result.error()) {
            (Some(value), _) => {
                output.push_str(&format!(
                    "{} {}\n\n",
                    "Tool:".cyan().bold(),
                    result.tool_name
                ));
                output.push_str(&Self::pretty_json(value));
                output.push('\n');
            }
            (None, Some(error)) => {
                output.push_str(&format!(
                    "{} {}\n",
                    format!("[{}]", error.code).red().bold(),
                    error.message
                ));
                if let Some(details) = &error.details {
                    output.push_str(&format!("{}\n", Self::indent(details, "  ")));
                }
            }
            (None, None) => output.push_str(&format!("{}\n", "(no output)".dimmed())),
        }

        let mut stats = Vec::new();
        if let Some(count) = result.metadata.record_count {
            stats.push(format!("{} record(s)", count));
        }
        if let Some(ms) = result.metadata.duration_ms {
            stats.push(format!("{} ms", ms));
        }
        if !stats.is_empty() {
            output.push_str(&format!("\n{}\n", stats.join(", ").dimmed()));
        }

        output
    }

    /// Whole tool result, metadata included, as JSON
    pub fn format_result_json(result: &ToolResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Config file locations, the effective configuration and its issues
    pub fn format_config(
        sources: &[(String, String, bool)],
        effective: &str,
        issues: &[String],
    ) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "Configuration files:".cyan().bold()));
        for (label, path, found) in sources {
            let status = if *found {
                "found".green()
            } else {
                "not found".dimmed()
            };
            output.push_str(&format!("  {:<8} {} ({})\n", label, path, status));
        }

        output.push_str(&Self::section_header("Effective configuration"));
        output.push_str(&Self::indent(effective.trim_end(), "  "));
        output.push('\n');

        if !issues.is_empty() {
            output.push_str(&format!("\n{}\n", "Issues:".yellow().bold()));
            for issue in issues {
                output.push_str(&format!("  * {}\n", issue));
            }
        }

        output
    }

    fn tool_entry(tool: &ToolDefinition) -> String {
        let mut entry = format!("  {}\n", tool.name.bold());
        entry.push_str(&format!("    {}\n", tool.description.dimmed()));
        for param in &tool.parameters {
            entry.push_str(&format!("    - {}\n", Self::parameter(param)));
        }
        entry
    }

    fn parameter(param: &ToolParameter) -> String {
        let qualifier = match (&param.default, param.required) {
            (_, true) => "required".yellow().to_string(),
            (Some(default), false) => format!("default {}", default),
            (None, false) => "optional".to_string(),
        };
        format!("{}: {} ({})", param.name, param.param_type, qualifier)
    }

    /// "Accounts_list_accounts" -> "Accounts"; root tools share one group.
    fn group_of(name: &str) -> &str {
        match name.split_once('_') {
            Some((entity, _)) if entity.starts_with(|c: char| c.is_ascii_uppercase()) => entity,
            _ => "Server",
        }
    }

    fn pretty_json(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataverse_domain::tool::entities::ParamType;
    use dataverse_domain::tool::value_objects::ToolError;
    use serde_json::json;

    fn spec() -> ToolSpec {
        ToolSpec::new()
            .register(
                ToolDefinition::new("Accounts_get_account", "Retrieve a single account.")
                    .with_parameter(ToolParameter::required(
                        "account_id",
                        "GUID of the account",
                        ParamType::String,
                    )),
            )
            .register(
                ToolDefinition::new("Leads_list_leads", "List leads.").with_parameter(
                    ToolParameter::optional("top", "Max records", ParamType::Integer)
                        .with_default(5),
                ),
            )
            .register(ToolDefinition::new("get_server_status", "Health check."))
            .register_alias("AccountsPlugin_get_account", "Accounts_get_account")
    }

    #[test]
    fn test_format_tools() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_tools(&spec(), true);

        assert!(output.contains("Available Tools (3)"));
        assert!(output.contains("account_id: string (required)"));
        assert!(output.contains("top: integer (default 5)"));
        assert!(output.contains("alias: AccountsPlugin_get_account"));
        assert!(output.contains("Server"));
    }

    #[test]
    fn test_format_tools_json_sorted() {
        let parsed: Value = serde_json::from_str(&ConsoleFormatter::format_tools_json(&spec())).unwrap();
        assert_eq!(parsed[0]["name"], "Accounts_get_account");
        assert_eq!(parsed[2]["name"], "get_server_status");
    }

    #[test]
    fn test_format_result_success() {
        colored::control::set_override(false);
        let result = ToolResult::success("Leads_list_leads", json!([{"subject": "Intro"}]))
            .with_duration(12);

        let output = ConsoleFormatter::format_result(&result);

        assert!(output.contains("\"subject\": \"Intro\""));
        assert!(output.contains("1 record(s), 12 ms"));
    }

    #[test]
    fn test_format_result_failure() {
        colored::control::set_override(false);
        let result = ToolResult::failure(
            "Accounts_get_account",
            ToolError::new(ToolError::NOT_FOUND, "HTTP 404: Does Not Exist"),
        );

        let output = ConsoleFormatter::format_result(&result);
        assert!(output.starts_with("[NOT_FOUND] HTTP 404: Does Not Exist"));
    }

    #[test]
    fn test_format_result_json() {
        let result = ToolResult::success("get_server_status", json!("OK"));
        let parsed: Value =
            serde_json::from_str(&ConsoleFormatter::format_result_json(&result)).unwrap();
        assert_eq!(parsed["output"], "OK");
        assert_eq!(parsed["success"], true);
    }

    #[test]
    fn test_format_config() {
        colored::control::set_override(false);
        let sources = vec![(
            "Project".to_string(),
            "./sales-dataverse.toml".to_string(),
            false,
        )];
        let output = ConsoleFormatter::format_config(
            &sources,
            "[dataverse]\ntimeout_seconds = 10\n",
            &["dataverse.timeout_seconds cannot be 0".to_string()],
        );

        assert!(output.contains("./sales-dataverse.toml (not found)"));
        assert!(output.contains("  timeout_seconds = 10"));
        assert!(output.contains("* dataverse.timeout_seconds cannot be 0"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
