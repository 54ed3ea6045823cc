//! Rasante CLI - pavement-base QA and release certification.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            file,
            readings,
            output,
            ancho,
        } => commands::evaluate::run(file, readings, output, ancho, cli.verbose),

        Commands::Stations { file, output } => commands::stations::run(file, output, cli.verbose),

        Commands::Anomalies { file, json } => commands::anomalies::run(file, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
