//! JADN CLI Binary
//!
//! Command-line entry point for the JADN schema and data shell.

use clap::Parser;
use jadn_cli::cli::{Cli, Session};
use jadn_cli::config::{AppConfig, SessionMode};
use jadn_cli::error::ShellError;
use jadn_cli::logging::init_logging;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Load configuration before logging so file-based settings apply.
    let mut config = match AppConfig::load(&cli.workspace, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };
    apply_cli_overrides(&mut config, &cli);

    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("JADN CLI starting");

    let mut session = Session::new(&config, &cli.workspace);

    let code = match cli.command.split_first() {
        Some((name, args)) => run_once(&mut session, name, args),
        None => match config.mode() {
            SessionMode::Prompt => run_shell(&mut session),
            SessionMode::Strict => {
                // A strict session has no interactive loop to fall back to.
                eprintln!("missing required argument. Usage: jadn <command> [args...]");
                2
            }
        },
    };
    process::exit(code);
}

/// Execute one command from argv. Teardown runs before the exit code is
/// decided so the error report is written on every path.
fn run_once(session: &mut Session, name: &str, args: &[String]) -> i32 {
    let result = session.dispatch(name, args);
    session.shutdown();
    match result {
        Ok(_) => 0,
        Err(ShellError::UserInput(msg)) => {
            println!("{}", msg);
            0
        }
        Err(err @ ShellError::MissingArgument { .. }) => {
            error!("Command rejected: {}", err);
            eprintln!("{}", err);
            2
        }
        Err(err) => {
            error!("Command failed: {}", err);
            eprintln!("{}", err);
            1
        }
    }
}

fn run_shell(session: &mut Session) -> i32 {
    match session.run_loop() {
        Ok(()) => 0,
        Err(err) => {
            error!("Session failed: {}", err);
            eprintln!("{}", err);
            1
        }
    }
}

/// Apply command-line overrides on top of the loaded configuration.
/// Precedence: CLI flags override config file values override defaults.
fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) {
    if cli.strict {
        config.session.use_prompts = false;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.logging.file = file.clone();
    }
    // Resolve a relative log file under the workspace so the session and
    // the subscriber agree on the path clear_err_report truncates.
    config.logging.file = config.log_file_path(&cli.workspace);
}
