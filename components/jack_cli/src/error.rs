//! Error types for the CLI

use core_types::CompileError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O error
    #[error("could not access '{}': {source}", .path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A source file failed to compile
    #[error("{}: {error}", .path.display())]
    Compile {
        /// Source file
        path: PathBuf,
        /// First error in the file
        error: CompileError,
    },

    /// The compile report could not be serialized
    #[error("could not serialize report: {0}")]
    Report(#[from] serde_json::Error),

    /// An explicitly named file without the .jack extension
    #[error("'{}' is not a .jack source file", .path.display())]
    NotSource {
        /// Rejected path
        path: PathBuf,
    },

    /// No .jack files under the given paths
    #[error("no .jack sources found")]
    NoSources,
}

impl CliError {
    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
