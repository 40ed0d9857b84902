//! Compile report
//!
//! A JSON summary of a `jackc` run, one entry per attempted file.

use crate::driver::CompiledFile;
use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Outcome of one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Source path
    pub path: String,
    /// Output path, if a file was written
    pub output: Option<String>,
    /// Number of routines generated
    pub routines: usize,
    /// Number of instructions generated
    pub instructions: usize,
    /// Error message, if compilation failed
    pub error: Option<String>,
}

/// Compile run report with statistics and per-file details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompileReport {
    /// Number of files attempted
    pub total: usize,
    /// Number of files compiled
    pub succeeded: usize,
    /// Number of files that failed
    pub failed: usize,
    /// Per-file entries in compilation order
    pub files: Vec<FileEntry>,
}

impl CompileReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a compiled file
    pub fn add_success(&mut self, file: &CompiledFile) {
        self.total += 1;
        self.succeeded += 1;
        self.files.push(FileEntry {
            path: file.source.display().to_string(),
            output: file.output.as_ref().map(|p| p.display().to_string()),
            routines: file.chunk.routine_count(),
            instructions: file.chunk.instruction_count(),
            error: None,
        });
    }

    /// Record a file that failed
    pub fn add_failure(&mut self, path: &Path, error: &CliError) {
        self.total += 1;
        self.failed += 1;
        self.files.push(FileEntry {
            path: path.display().to_string(),
            output: None,
            routines: 0,
            instructions: 0,
            error: Some(error.to_string()),
        });
    }

    /// Generate a human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Compiled {} of {} files ({} failed)",
            self.succeeded, self.total, self.failed
        )
    }

    /// Export report as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Import report from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Write the JSON report to a file
    pub fn write_to(&self, path: &Path) -> CliResult<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| CliError::io(path, e))
    }
}
