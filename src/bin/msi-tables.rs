//! msi-tables CLI Binary
//!
//! Builds Windows Installer tables from directory listings and a feature file.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use msi_tables::logging::init_logging;
use msi_tables::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    if std::env::args_os().len() <= 1 {
        let _ = Cli::command().print_help();
        println!();
        process::exit(0);
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                process::exit(1);
            }
        },
    };

    let context = match CliContext::from_cli(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&context.config().logging)) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    match context.execute() {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
