//! Jack Compiler CLI Library
//!
//! Provides the Driver and supporting modules for the `jackc` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod driver;
pub mod error;
pub mod report;

pub use cli::Cli;
pub use driver::{CompiledFile, DiagnosticStream, Driver};
pub use error::{CliError, CliResult};
pub use report::CompileReport;
