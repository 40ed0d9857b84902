//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

/// Compile Jack classes to VM code
#[derive(Parser, Debug)]
#[command(name = "jackc", version, about, long_about = None)]
pub struct Cli {
    /// .jack files, or directories whose .jack files are compiled
    #[arg(required = true, value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Write .vm files into this directory instead of next to each source
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Print generated code to stdout instead of writing files
    #[arg(long, conflicts_with = "out_dir")]
    pub stdout: bool,

    /// Print the token stream before compiling
    #[arg(long)]
    pub print_tokens: bool,

    /// Print the AST before generating code
    #[arg(long)]
    pub print_ast: bool,

    /// Write a JSON compile report to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Print per-file timings and output paths
    #[arg(short, long)]
    pub verbose: bool,
}
