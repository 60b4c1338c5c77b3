//! Help rendering and the interactive banner, driven by the command table.

use crate::cli::route::{CommandSpec, COMMANDS};
use owo_colors::OwoColorize;

/// Banner printed when the interactive shell starts.
pub fn intro_banner() -> String {
    format!(
        "{}\nType help or ? to list commands.",
        "Welcome to the JSON Abstract Data Notation (JADN) CLI tool.".bold()
    )
}

/// The full command listing, aligned on the usage column.
pub fn render_help() -> String {
    let width = COMMANDS.iter().map(|spec| spec.usage.len()).max().unwrap_or(0);
    let mut out = String::from("Available commands:");
    for spec in COMMANDS {
        out.push('\n');
        out.push_str(&format!(
            "  {:<width$}  - {}",
            spec.usage,
            spec.summary,
            width = width
        ));
    }
    out
}

/// Usage and summary for a single command.
pub fn render_command_help(spec: &CommandSpec) -> String {
    format!("{}\n  {}", spec.usage, spec.summary)
}
