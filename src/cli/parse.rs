//! CLI parse: clap types for the JADN shell. No behavior; definitions only.
//!
//! Only the outer surface is clap's: global flags plus the trailing command
//! tokens. The command names themselves are routed through the static table
//! in `route`, which serves argv one-shots and interactive lines alike.

use clap::Parser;
use std::path::PathBuf;

/// JADN CLI - schema validation, conversion, and data tooling
#[derive(Parser, Debug)]
#[command(name = "jadn")]
#[command(about = "Interactive command-line shell for JADN schema and data files")]
pub struct Cli {
    /// Command tokens; leave empty to start the interactive shell
    #[arg(trailing_var_arg = true)]
    pub command: Vec<String>,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fail fast on missing arguments instead of prompting
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
