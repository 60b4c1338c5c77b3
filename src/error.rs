//! Error types for the JADN command shell.

use thiserror::Error;

/// Failures raised by a backend capability (validation, conversion,
/// translation). Every variant maps to a stable ledger `errorType` string
/// via [`BackendError::kind`].
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Schema Invalid - {0}")]
    SchemaInvalid(String),

    #[error("Data Invalid - {0}")]
    DataInvalid(String),

    #[error("Conversion failed - {0}")]
    ConversionFailed(String),

    #[error("Translation failed - {0}")]
    TranslationFailed(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported format: {0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError {
    /// Stable error-type tag recorded in the session error ledger.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::SchemaInvalid(_) => "SchemaInvalid",
            BackendError::DataInvalid(_) => "DataInvalid",
            BackendError::ConversionFailed(_) => "ConversionFailed",
            BackendError::TranslationFailed(_) => "TranslationFailed",
            BackendError::FileNotFound(_) => "FileNotFound",
            BackendError::Unsupported(_) => "Unsupported",
            BackendError::Io(_) => "Io",
        }
    }
}

/// Orchestration-level errors: everything the router and resolvers can raise
/// outside of a backend call.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Recoverable user-facing condition: unknown command, invalid or
    /// cancelled selection. Printed to stdout; never recorded in the ledger.
    #[error("{0}")]
    UserInput(String),

    /// A required argument was absent in strict mode. Terminates the
    /// process with a usage message and a non-zero exit code.
    #[error("missing required argument. Usage: {usage}")]
    MissingArgument { usage: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ShellError {
    fn from(err: config::ConfigError) -> Self {
        ShellError::Config(err.to_string())
    }
}

impl From<csv::Error> for ShellError {
    fn from(err: csv::Error) -> Self {
        ShellError::Io(std::io::Error::new(std::io::ErrorKind::Other, err))
    }
}
