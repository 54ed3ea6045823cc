//! Command implementations.

pub mod anomalies;
pub mod evaluate;
pub mod stations;

use std::path::{Path, PathBuf};

use rasante::{Evaluation, Evaluator, EvaluatorConfig, ProjectData};

/// Load a project document, optionally merge a CSV reading batch, and
/// run the evaluator.
pub fn load_and_evaluate(
    file: &Path,
    readings_csv: Option<PathBuf>,
    config: EvaluatorConfig,
) -> Result<Evaluation, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut data = ProjectData::from_json_file(file)?;
    if let Some(csv_path) = readings_csv {
        // CSV readings are later submissions: at an existing
        // (station, division) key they overwrite the document's value.
        data.readings.extend(rasante::read_readings_csv(csv_path)?);
    }

    Ok(Evaluator::with_config(config).evaluate(&data)?)
}
