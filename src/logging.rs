//! Logging System
//!
//! Structured logging via the `tracing` crate. The shell keeps its
//! diagnostics out of the interactive stream by default: the session log
//! goes to an append-mode file under the workspace, which is the file the
//! `clear_err_report` command truncates.

use crate::error::ShellError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output is "file"); relative paths are resolved
    /// against the workspace root before init.
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Enable colored output (text format, stdout only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "file".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("jadn_cli.log")
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: default_log_file(),
            color: default_true(),
        }
    }
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. CLI arguments (merged into the config before this call)
/// 2. Environment variables (JADN_LOG, JADN_LOG_FORMAT, JADN_LOG_OUTPUT)
/// 3. Configuration file
/// 4. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ShellError> {
    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let to_file = determine_file_output(config)?;

    let base_subscriber = Registry::default().with(filter);
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let get_file_writer = || -> Result<std::fs::File, ShellError> {
        let log_file = config
            .map(|c| c.file.clone())
            .unwrap_or_else(default_log_file);

        if let Some(parent) = log_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ShellError::Config(format!("Failed to create log directory: {}", e))
                })?;
            }
        }
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .map_err(|e| {
                ShellError::Config(format!("Failed to open log file {:?}: {}", log_file, e))
            })
    };

    if format == "json" {
        if to_file {
            let file_writer = get_file_writer()?;
            base_subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(file_writer),
                )
                .init();
        } else {
            base_subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(std::io::stdout),
                )
                .init();
        }
    } else {
        if to_file {
            let file_writer = get_file_writer()?;
            base_subscriber
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(false)
                        .with_writer(file_writer),
                )
                .init();
        } else {
            base_subscriber
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(use_color)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
    }

    Ok(())
}

/// Truncate the per-session diagnostic log, leaving the file in place.
/// Missing files are not an error; there is simply nothing to clear.
pub fn truncate_log(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        return Ok(());
    }
    std::fs::OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map(|_| ())
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, ShellError> {
    if let Ok(filter) = EnvFilter::try_from_env("JADN_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    Ok(EnvFilter::new(level))
}

/// Determine output format from config or environment
fn determine_format(config: Option<&LoggingConfig>) -> Result<String, ShellError> {
    if let Ok(format) = std::env::var("JADN_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    if format != "json" && format != "text" {
        return Err(ShellError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }

    Ok(format.to_string())
}

/// Determine whether logs go to the file (vs. stdout)
fn determine_file_output(config: Option<&LoggingConfig>) -> Result<bool, ShellError> {
    let output = match std::env::var("JADN_LOG_OUTPUT") {
        Ok(value) => value,
        Err(_) => config
            .map(|c| c.output.clone())
            .unwrap_or_else(default_output),
    };

    match output.as_str() {
        "stdout" => Ok(false),
        "file" => Ok(true),
        other => Err(ShellError::Config(format!(
            "Invalid log output: {} (must be 'stdout' or 'file')",
            other
        ))),
    }
}
