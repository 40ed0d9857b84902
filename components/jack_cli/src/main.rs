//! Jack Compiler CLI
//!
//! Entry point for `jackc`. Parses CLI arguments and delegates to the
//! Driver for compilation.

use clap::Parser as ClapParser;
use jack_cli::{Cli, CliError, CompileReport, Driver};

fn main() {
    let cli = Cli::parse();

    let driver = Driver::new()
        .with_print_tokens(cli.print_tokens)
        .with_print_ast(cli.print_ast)
        .with_verbose(cli.verbose)
        .with_stdout(cli.stdout)
        .with_out_dir(cli.out_dir.clone());

    let mut report = CompileReport::new();
    let result = driver.run(&cli.paths, &mut report);

    if let Some(path) = &cli.report {
        if let Err(e) = report.write_to(path) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    match result {
        Ok(_) => {
            if cli.verbose {
                driver.diagnostic(format_args!("{}", report.summary()));
            }
        }
        Err(e @ CliError::Compile { .. }) => {
            eprintln!("Compile Error: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
