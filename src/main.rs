//! DupMerge - Duplicate File Merger
//!
//! Entry point for the dupmerge CLI.

use clap::Parser;
use dupmerge::{
    cli::{Cli, OutputFormat},
    error::{ExitCode, StructuredError},
};

fn main() {
    let cli = Cli::parse();
    let json_errors = cli.output == OutputFormat::Json;

    match dupmerge::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::GeneralError;

            // Diagnostics share stdout with the progress lines.
            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                match serde_json::to_string_pretty(&structured) {
                    Ok(json) => println!("{json}"),
                    Err(_) => println!("[{}] Error: {:#}", exit_code.code_prefix(), err),
                }
            } else {
                println!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
