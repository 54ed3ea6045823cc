//! Rasante: topographic QA and volumetric computation engine for
//! pavement-base release certification.
//!
//! Field crews measure pavement-base elevations at regular stations and
//! transverse offsets. Rasante turns those raw rod readings into
//! absolute elevations, classifies them against the design surface and
//! the regulatory (SCT) tolerance, integrates per-station volumes along
//! the alignment and issues the CONFORME / NO CONFORME verdict that
//! gates the official pavement-release report.
//!
//! # Core principles
//!
//! - **Pure**: every derived number is a function of the project,
//!   stations, measurements and readings passed in. No I/O, no clocks,
//!   no shared state; identical inputs give byte-identical output.
//! - **Fail fast**: missing stations, out-of-bounds readings and empty
//!   statistics are typed errors, never silent zeros.
//! - **Advisory anomalies**: field-quality findings annotate the result
//!   for human review without ever blocking the pipeline.
//!
//! # Example
//!
//! ```no_run
//! use rasante::{Evaluator, ProjectData};
//!
//! let data = ProjectData::from_json_file("proyecto.json").unwrap();
//! let evaluation = Evaluator::new().evaluate(&data).unwrap();
//!
//! println!("estado: {}", evaluation.summary.estado_inspeccion.label());
//! println!("volumen excedente: {:.2} m3", evaluation.summary.volumen_excedente);
//! ```

pub mod aggregate;
pub mod anomaly;
pub mod classify;
pub mod error;
pub mod evaluator;
pub mod geometry;
pub mod input;
pub mod model;
pub mod resolver;
pub mod stats;

pub use aggregate::{DEFAULT_ANCHO_PAVIMENTO, StationAggregation, StationAggregator, StationRow};
pub use anomaly::{Anomaly, AnomalyConfig, AnomalyDetector, AnomalyKind, AnomalySeverity};
pub use classify::{Calidad, Clasificacion, Classification, EnrichedReading, classify};
pub use error::{RasanteError, Result};
pub use evaluator::{Evaluation, EvaluationWarning, Evaluator, EvaluatorConfig};
pub use input::{ProjectData, read_readings_csv};
pub use model::{Measurement, Project, Reading, ReadingSet, TheoreticalStation};
pub use resolver::{ElevationResolver, ResolvedElevations};
pub use stats::{EstadoInspeccion, ProjectSummary, evaluate_project};
