//! Integration tests for configuration loading and its effect on session
//! construction.

use jadn_cli::config::{AppConfig, Dirs, SessionMode};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults_when_no_config_file_exists() {
    let workspace = TempDir::new().unwrap();
    let config = AppConfig::load(workspace.path(), None).unwrap();

    assert_eq!(config.mode(), SessionMode::Prompt);
    assert_eq!(config.dirs.schemas, "schemas");
    assert_eq!(config.dirs.data, "data");
    assert_eq!(config.dirs.output, "output");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_workspace_config_switches_to_strict() {
    let workspace = TempDir::new().unwrap();
    fs::write(
        workspace.path().join("config.toml"),
        "[session]\nuse_prompts = false\n",
    )
    .unwrap();

    let config = AppConfig::load(workspace.path(), None).unwrap();
    assert_eq!(config.mode(), SessionMode::Strict);
}

#[test]
fn test_custom_directories_resolve_under_workspace() {
    let workspace = TempDir::new().unwrap();
    fs::write(
        workspace.path().join("config.toml"),
        "[dirs]\nschemas = \"in/schemas\"\noutput = \"out/reports\"\n",
    )
    .unwrap();

    let config = AppConfig::load(workspace.path(), None).unwrap();
    let dirs = Dirs::resolve(workspace.path(), &config.dirs);
    assert_eq!(dirs.schemas, workspace.path().join("in/schemas"));
    assert_eq!(dirs.data, workspace.path().join("data"));
    assert_eq!(dirs.output, workspace.path().join("out/reports"));
}

#[test]
fn test_explicit_config_path_must_exist() {
    let workspace = TempDir::new().unwrap();
    let missing = workspace.path().join("absent.toml");
    assert!(AppConfig::load(workspace.path(), Some(&missing)).is_err());
}

#[test]
fn test_log_file_path_resolution() {
    let workspace = TempDir::new().unwrap();
    let config = AppConfig::load(workspace.path(), None).unwrap();
    assert_eq!(
        config.log_file_path(workspace.path()),
        workspace.path().join("jadn_cli.log")
    );
}
