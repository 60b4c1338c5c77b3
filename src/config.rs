//! Configuration System
//!
//! Workspace-local configuration with merge policy: defaults first, then an
//! optional `config.toml` at the workspace root, then CLI flag overrides
//! applied by the binary. The session mode is read exactly once at startup
//! and never changes for the life of the session.

use crate::error::ShellError;
use crate::logging::LoggingConfig;
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Session behavior
    #[serde(default)]
    pub session: SessionConfig,

    /// Well-known directories, relative to the workspace root
    #[serde(default)]
    pub dirs: DirsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Session behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// When true (default), missing arguments fall back to interactive
    /// prompts; when false the shell is strict and fails fast.
    #[serde(default = "default_use_prompts")]
    pub use_prompts: bool,
}

fn default_use_prompts() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            use_prompts: default_use_prompts(),
        }
    }
}

/// Directory layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirsConfig {
    #[serde(default = "default_schemas_dir")]
    pub schemas: String,

    #[serde(default = "default_data_dir")]
    pub data: String,

    #[serde(default = "default_output_dir")]
    pub output: String,
}

fn default_schemas_dir() -> String {
    "schemas".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

impl Default for DirsConfig {
    fn default() -> Self {
        Self {
            schemas: default_schemas_dir(),
            data: default_data_dir(),
            output: default_output_dir(),
        }
    }
}

/// How the session treats missing arguments. Fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Interactive fallback: list candidates and prompt.
    Prompt,
    /// Fail fast: a missing required argument terminates the command.
    Strict,
}

impl SessionMode {
    pub fn from_use_prompts(use_prompts: bool) -> SessionMode {
        if use_prompts {
            SessionMode::Prompt
        } else {
            SessionMode::Strict
        }
    }
}

/// Well-known directories resolved against the workspace root.
#[derive(Debug, Clone)]
pub struct Dirs {
    pub schemas: PathBuf,
    pub data: PathBuf,
    pub output: PathBuf,
}

impl Dirs {
    pub fn resolve(workspace_root: &Path, config: &DirsConfig) -> Dirs {
        Dirs {
            schemas: workspace_root.join(&config.schemas),
            data: workspace_root.join(&config.data),
            output: workspace_root.join(&config.output),
        }
    }
}

impl AppConfig {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): built-in defaults, then
    /// `<workspace>/config.toml` when present, or the explicit `config_path`
    /// when one was passed on the command line.
    pub fn load(workspace_root: &Path, config_path: Option<&Path>) -> Result<AppConfig, ShellError> {
        let mut builder = Config::builder()
            .set_default("session.use_prompts", true)?
            .set_default("dirs.schemas", "schemas")?
            .set_default("dirs.data", "data")?
            .set_default("dirs.output", "output")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?
            .set_default("logging.output", "file")?
            .set_default("logging.file", "jadn_cli.log")?
            .set_default("logging.color", true)?;

        match config_path {
            Some(path) => {
                let path_str = path.to_string_lossy().into_owned();
                builder = builder.add_source(File::with_name(&path_str).required(true));
            }
            None => {
                let workspace_config = workspace_root.join("config.toml");
                if workspace_config.exists() {
                    let path_str = workspace_config.to_string_lossy().into_owned();
                    builder = builder.add_source(File::with_name(&path_str).required(false));
                }
            }
        }

        let config = builder.build()?.try_deserialize::<AppConfig>()?;
        Ok(config)
    }

    /// Session mode derived from the `use_prompts` flag.
    pub fn mode(&self) -> SessionMode {
        SessionMode::from_use_prompts(self.session.use_prompts)
    }

    /// Diagnostic log path with relative values resolved under the workspace.
    pub fn log_file_path(&self, workspace_root: &Path) -> PathBuf {
        if self.logging.file.is_absolute() {
            self.logging.file.clone()
        } else {
            workspace_root.join(&self.logging.file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load(temp_dir.path(), None).unwrap();

        assert!(config.session.use_prompts);
        assert_eq!(config.mode(), SessionMode::Prompt);
        assert_eq!(config.dirs.schemas, "schemas");
        assert_eq!(config.dirs.data, "data");
        assert_eq!(config.dirs.output, "output");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.output, "file");
    }

    #[test]
    fn test_workspace_config_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("config.toml"),
            "[session]\nuse_prompts = false\n\n[dirs]\nschemas = \"my-schemas\"\n",
        )
        .unwrap();

        let config = AppConfig::load(temp_dir.path(), None).unwrap();
        assert!(!config.session.use_prompts);
        assert_eq!(config.mode(), SessionMode::Strict);
        assert_eq!(config.dirs.schemas, "my-schemas");
        // Untouched keys keep their defaults.
        assert_eq!(config.dirs.data, "data");
    }

    #[test]
    fn test_explicit_config_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "[dirs]\noutput = \"reports\"\n").unwrap();

        let config = AppConfig::load(temp_dir.path(), Some(&path)).unwrap();
        assert_eq!(config.dirs.output, "reports");

        let missing = temp_dir.path().join("nope.toml");
        assert!(AppConfig::load(temp_dir.path(), Some(&missing)).is_err());
    }

    #[test]
    fn test_dirs_resolve_under_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load(temp_dir.path(), None).unwrap();
        let dirs = Dirs::resolve(temp_dir.path(), &config.dirs);

        assert_eq!(dirs.schemas, temp_dir.path().join("schemas"));
        assert_eq!(dirs.data, temp_dir.path().join("data"));
        assert_eq!(dirs.output, temp_dir.path().join("output"));
    }

    #[test]
    fn test_log_file_path_resolution() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load(temp_dir.path(), None).unwrap();
        assert_eq!(
            config.log_file_path(temp_dir.path()),
            temp_dir.path().join("jadn_cli.log")
        );
    }
}
