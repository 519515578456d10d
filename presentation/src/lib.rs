//! Presentation layer for sales-dataverse
//!
//! This crate contains CLI definitions and console output formatting.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{ArgumentError, Cli, Command, OutputFormat, parse_call_arguments};
pub use output::console::ConsoleFormatter;
