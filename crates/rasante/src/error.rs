//! Error types for the rasante library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for rasante operations.
#[derive(Debug, Error)]
pub enum RasanteError {
    /// A measurement references a km with no matching design station.
    /// Blocks certification: it indicates a design/field data mismatch.
    #[error(
        "no theoretical station within {tolerance} of km {estacion_km}"
    )]
    MissingStation { estacion_km: f64, tolerance: f64 },

    /// Rod reading out of physical bounds.
    #[error(
        "invalid rod reading {lectura_mira} at km {estacion_km}, division {division_transversal}: {reason}"
    )]
    InvalidReading {
        estacion_km: f64,
        division_transversal: f64,
        lectura_mira: f64,
        reason: String,
    },

    /// Benchmark configuration with non-finite fields.
    #[error("invalid measurement at km {estacion_km}: {reason}")]
    InvalidMeasurement { estacion_km: f64, reason: String },

    /// A reading references a transverse division not configured in the project.
    #[error("unknown transverse division {division_transversal} at km {estacion_km}")]
    UnknownDivision {
        estacion_km: f64,
        division_transversal: f64,
    },

    /// Statistics requested with zero valid determinations.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Stations not sorted by strictly ascending km when cumulative
    /// aggregation was requested.
    #[error(
        "station ordering violation: km {current} follows km {previous} (stations must be strictly ascending)"
    )]
    OrderingViolation { previous: f64, current: f64 },

    /// Invalid project configuration.
    #[error("project configuration error: {0}")]
    ProjectConfig(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for rasante operations.
pub type Result<T> = std::result::Result<T, RasanteError>;
