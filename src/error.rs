// src/error.rs

//! Crate-wide error types
//!
//! Every failure in larder is a configuration or environment problem
//! requiring operator intervention: there are no retries and no
//! recoverable variants. The three broad kinds are configuration
//! errors (bad option, unsupported compiler, missing recipe), fetch
//! errors (download or checksum failure), and staging errors (the
//! destination tree could not be produced).

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Recipe file could not be parsed or failed validation
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid engine or descriptor configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An option name not declared by the descriptor
    #[error("Unknown option '{option}' for package '{package}'")]
    UnknownOption { package: String, option: String },

    /// No recipe exists in the registry under this name
    #[error("Unknown package '{0}'")]
    UnknownPackage(String),

    /// A requirement was enabled but has no available recipe
    #[error("Recipe not found for required dependency '{0}'")]
    RecipeNotFound(String),

    /// Compiler below the minimum version the package supports
    #[error("{package} requires {compiler} >= {minimum}, found {found}")]
    UnsupportedCompiler {
        package: String,
        compiler: String,
        minimum: String,
        found: String,
    },

    /// Source archive download failed
    #[error("Download error: {0}")]
    DownloadError(String),

    /// Downloaded archive does not match its pinned checksum
    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// File staging failed; the destination was left untouched
    #[error("Staging error: {0}")]
    StagingError(String),

    /// Generic I/O failure
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IoError(e.to_string())
    }
}
