//! CLI domain: parse, route, help, and output presentation only.
//! No backend logic; a single static command table dispatches to the
//! operation handlers.

mod help;
mod output;
mod parse;
mod route;

pub use help::{intro_banner, render_command_help, render_help};
pub use output::render_report_table;
pub use parse::Cli;
pub use route::{Control, Session, COMMANDS};
