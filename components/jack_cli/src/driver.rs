//! Compilation driver
//!
//! The Driver turns source paths into .vm files:
//! - discovers .jack files in directories
//! - runs the lexer, parser and code generator per file
//! - writes output next to the source, into an output directory, or to stdout

use crate::error::{CliError, CliResult};
use crate::report::CompileReport;
use parser::{Parser, VmGenerator};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use vm_code::VmChunk;
use walkdir::WalkDir;

/// Source file extension
pub const SOURCE_EXTENSION: &str = "jack";
/// Output file extension
pub const OUTPUT_EXTENSION: &str = "vm";

/// Where token dumps, AST dumps and verbose messages are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticStream {
    /// Standard output, used when generated code goes to files
    Stdout,
    /// Standard error, used when generated code goes to stdout
    Stderr,
}

fn is_source(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == SOURCE_EXTENSION)
        .unwrap_or(false)
}

fn require_source(path: &Path) -> CliResult<()> {
    if is_source(path) {
        Ok(())
    } else {
        Err(CliError::NotSource {
            path: path.to_path_buf(),
        })
    }
}

/// The result of compiling one file
#[derive(Debug, Clone)]
pub struct CompiledFile {
    /// Source path
    pub source: PathBuf,
    /// Path written, or `None` when printing to stdout
    pub output: Option<PathBuf>,
    /// Generated instructions
    pub chunk: VmChunk,
}

/// Drives compilation of a set of source files
#[derive(Debug, Default)]
pub struct Driver {
    print_tokens: bool,
    print_ast: bool,
    verbose: bool,
    to_stdout: bool,
    out_dir: Option<PathBuf>,
}

impl Driver {
    /// Create a driver that writes each .vm next to its source
    ///
    /// # Example
    /// ```
    /// use jack_cli::Driver;
    ///
    /// let driver = Driver::new().with_verbose(true);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable token stream printing
    pub fn with_print_tokens(mut self, enabled: bool) -> Self {
        self.print_tokens = enabled;
        self
    }

    /// Enable AST printing
    pub fn with_print_ast(mut self, enabled: bool) -> Self {
        self.print_ast = enabled;
        self
    }

    /// Enable timing and output path messages
    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Print generated code instead of writing files
    pub fn with_stdout(mut self, enabled: bool) -> Self {
        self.to_stdout = enabled;
        self
    }

    /// Write output files into `dir`
    pub fn with_out_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.out_dir = dir;
        self
    }

    /// Expand the given paths into source files.
    ///
    /// Files are taken as given but must carry the `.jack` extension;
    /// directories contribute their `.jack` files (not recursively) in name
    /// order.
    pub fn discover(paths: &[PathBuf]) -> CliResult<Vec<PathBuf>> {
        let mut sources = Vec::new();
        for path in paths {
            let metadata = fs::metadata(path).map_err(|e| CliError::io(path, e))?;
            if !metadata.is_dir() {
                require_source(path)?;
                sources.push(path.clone());
                continue;
            }
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .min_depth(1)
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| is_source(e.path()))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            sources.extend(found);
        }

        if sources.is_empty() {
            return Err(CliError::NoSources);
        }
        Ok(sources)
    }

    /// Where the .vm file for a source goes
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let target = source.with_extension(OUTPUT_EXTENSION);
        match (&self.out_dir, target.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => target,
        }
    }

    /// Stream that diagnostics go to, kept apart from generated code
    pub fn diagnostic_stream(&self) -> DiagnosticStream {
        if self.to_stdout {
            DiagnosticStream::Stderr
        } else {
            DiagnosticStream::Stdout
        }
    }

    /// Print one diagnostic line
    pub fn diagnostic(&self, line: fmt::Arguments<'_>) {
        match self.diagnostic_stream() {
            DiagnosticStream::Stdout => println!("{}", line),
            DiagnosticStream::Stderr => eprintln!("{}", line),
        }
    }

    /// Compile source text, printing any requested diagnostics
    pub fn compile_source(&self, path: &Path, source: &str) -> CliResult<VmChunk> {
        let compile_error = |error| CliError::Compile {
            path: path.to_path_buf(),
            error,
        };

        if self.print_tokens {
            let tokens = parser::tokenize(source).map_err(compile_error)?;
            for token in tokens.iter().filter(|t| !t.is_trivia()) {
                self.diagnostic(format_args!("{}\t{}", token.position(), token));
            }
        }

        let start = Instant::now();
        let class = Parser::new(source).parse_class().map_err(compile_error)?;
        if self.verbose {
            self.diagnostic(format_args!("Parsed {} in {:?}", path.display(), start.elapsed()));
        }

        if self.print_ast {
            self.diagnostic(format_args!("{}", class));
        }

        let start = Instant::now();
        let chunk = VmGenerator::new()
            .generate(&class)
            .map_err(compile_error)?;
        if self.verbose {
            self.diagnostic(format_args!("Codegen {} in {:?}", path.display(), start.elapsed()));
        }

        Ok(chunk)
    }

    /// Read, compile and emit one source file
    pub fn compile_file(&self, path: &Path) -> CliResult<CompiledFile> {
        require_source(path)?;
        let source = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        let chunk = self.compile_source(path, &source)?;

        if self.to_stdout {
            print!("{}", chunk);
            return Ok(CompiledFile {
                source: path.to_path_buf(),
                output: None,
                chunk,
            });
        }

        let output = self.output_path(path);
        if let Some(dir) = &self.out_dir {
            fs::create_dir_all(dir).map_err(|e| CliError::io(dir, e))?;
        }
        fs::write(&output, chunk.to_text()).map_err(|e| CliError::io(&output, e))?;
        if self.verbose {
            self.diagnostic(format_args!("Wrote to {}", output.display()));
        }

        Ok(CompiledFile {
            source: path.to_path_buf(),
            output: Some(output),
            chunk,
        })
    }

    /// Compile every source under `paths`, stopping at the first failure.
    ///
    /// Each attempted file is recorded in `report`.
    pub fn run(&self, paths: &[PathBuf], report: &mut CompileReport) -> CliResult<Vec<CompiledFile>> {
        let sources = Self::discover(paths)?;
        let mut compiled = Vec::with_capacity(sources.len());
        for source in &sources {
            match self.compile_file(source) {
                Ok(file) => {
                    report.add_success(&file);
                    compiled.push(file);
                }
                Err(error) => {
                    report.add_failure(source, &error);
                    return Err(error);
                }
            }
        }
        Ok(compiled)
    }
}
