//! Benchreg CLI Binary
//!
//! Command-line interface for the benchmark registry utilities.

use benchreg::logging::init_logging;
use benchreg::tooling::cli::{Cli, CliContext};
use clap::Parser;
use std::process;

fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let logging = cli.logging_config(&context.config().logging);
    if let Err(e) = init_logging(Some(&logging), cli.log_file.as_deref()) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
