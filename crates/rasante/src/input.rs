//! Loading glue: project documents from JSON and reading batches from CSV.
//!
//! The engine itself is pure; this module is the thin boundary used by
//! the CLI and other in-process callers to get records into it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RasanteError, Result};
use crate::model::{Measurement, Project, Reading, ReadingSet, TheoreticalStation};

/// The full input bundle for one evaluation: project configuration,
/// design stations, station visits and rod readings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectData {
    pub project: Project,
    pub stations: Vec<TheoreticalStation>,
    pub measurements: Vec<Measurement>,
    pub readings: Vec<Reading>,
}

impl ProjectData {
    /// Parse a project document from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a project document from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| RasanteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// The readings as an upsert set: duplicate (station, division)
    /// submissions collapse to the last one.
    pub fn reading_set(&self) -> ReadingSet {
        ReadingSet::from_readings(self.readings.iter().cloned())
    }
}

/// Read a batch of rod readings from a CSV file with columns
/// `estacion_km,division_transversal,lectura_mira`. An empty
/// `lectura_mira` cell is a pending reading.
pub fn read_readings_csv(path: impl AsRef<Path>) -> Result<Vec<Reading>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;
    let mut readings = Vec::new();
    for record in reader.deserialize() {
        let reading: Reading = record?;
        readings.push(reading);
    }
    Ok(readings)
}
