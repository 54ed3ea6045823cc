//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rasante: topographic QA for pavement-base release certification
#[derive(Parser)]
#[command(name = "rasante")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a project document and print the conformance summary
    Evaluate {
        /// Path to the project JSON document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Additional rod readings from a CSV file
        /// (estacion_km,division_transversal,lectura_mira)
        #[arg(short, long)]
        readings: Option<PathBuf>,

        /// Write the full evaluation as JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Effective pavement width in meters
        #[arg(long, default_value_t = rasante::DEFAULT_ANCHO_PAVIMENTO)]
        ancho: f64,
    },

    /// Print the per-station volumetric table
    Stations {
        /// Path to the project JSON document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the station rows as CSV to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List advisory field-quality anomalies
    Anomalies {
        /// Path to the project JSON document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
