//! The evaluation facade: one entry point running the full pipeline.

use serde::{Deserialize, Serialize};

use crate::aggregate::{DEFAULT_ANCHO_PAVIMENTO, StationAggregator, StationRow};
use crate::anomaly::{Anomaly, AnomalyConfig, AnomalyDetector};
use crate::classify::{EnrichedReading, classify};
use crate::error::{RasanteError, Result};
use crate::input::ProjectData;
use crate::model::{STATION_MATCH_TOLERANCE, find_station};
use crate::resolver::{DEFAULT_MAX_LECTURA_MIRA, ElevationResolver};
use crate::stats::{ProjectSummary, evaluate_project};

/// Configuration for an evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Effective pavement width used for cross-sectional areas, meters.
    pub ancho_pavimento: f64,
    /// Upper bound for a sane rod reading, meters.
    pub max_lectura_mira: f64,
    /// Anomaly detector thresholds.
    pub anomaly: AnomalyConfig,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            ancho_pavimento: DEFAULT_ANCHO_PAVIMENTO,
            max_lectura_mira: DEFAULT_MAX_LECTURA_MIRA,
            anomaly: AnomalyConfig::default(),
        }
    }
}

/// Non-fatal data-quality conditions surfaced by an evaluation.
///
/// Unlike errors these do not stop the pipeline, but unlike the source
/// system they are never silently swallowed either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "snake_case")]
pub enum EvaluationWarning {
    /// A station was visited but none of its readings could be resolved,
    /// so it contributes no volume.
    StationIncomplete { estacion_km: f64 },
    /// A reading row exists but its rod value has not been captured yet.
    PendingReading {
        estacion_km: f64,
        division_transversal: f64,
    },
    /// A reading references a station with no measurement visit.
    ReadingWithoutMeasurement {
        estacion_km: f64,
        division_transversal: f64,
    },
}

impl EvaluationWarning {
    pub fn message(&self) -> String {
        match self {
            EvaluationWarning::StationIncomplete { estacion_km } => format!(
                "station km {estacion_km} has no resolvable readings and contributes no volume"
            ),
            EvaluationWarning::PendingReading {
                estacion_km,
                division_transversal,
            } => format!(
                "reading at km {estacion_km}, division {division_transversal} is pending capture"
            ),
            EvaluationWarning::ReadingWithoutMeasurement {
                estacion_km,
                division_transversal,
            } => format!(
                "reading at km {estacion_km}, division {division_transversal} has no benchmark measurement"
            ),
        }
    }
}

/// Complete output of one evaluation run: the sole input consumed by the
/// reporting and UI layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Every resolvable reading with all derived fields populated.
    pub readings: Vec<EnrichedReading>,
    /// One volumetric row per complete station, ascending km.
    pub stations: Vec<StationRow>,
    /// Project statistics, conformance verdict and volumetric rollup.
    pub summary: ProjectSummary,
    /// Advisory field-quality findings.
    pub anomalies: Vec<Anomaly>,
    /// Non-fatal data-quality conditions.
    pub warnings: Vec<EvaluationWarning>,
}

/// Runs the full pipeline: resolve elevations, classify, aggregate
/// stations and evaluate project conformance.
///
/// Pure and synchronous: deterministic for identical inputs, no I/O, no
/// shared mutable state. Safe to call from any thread.
pub struct Evaluator {
    config: EvaluatorConfig,
    resolver: ElevationResolver,
    aggregator: StationAggregator,
    detector: AnomalyDetector,
}

impl Evaluator {
    /// Create an evaluator with default configuration.
    pub fn new() -> Self {
        Self::with_config(EvaluatorConfig::default())
    }

    /// Create an evaluator with custom configuration.
    pub fn with_config(config: EvaluatorConfig) -> Self {
        let resolver = ElevationResolver::new(config.max_lectura_mira);
        let aggregator = StationAggregator::new(config.ancho_pavimento);
        let detector = AnomalyDetector::new(config.anomaly.clone());
        Self {
            config,
            resolver,
            aggregator,
            detector,
        }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate a project document end to end.
    ///
    /// Fails fast on structural problems (invalid project, missing
    /// design station, out-of-bounds reading, unknown division,
    /// out-of-order stations, zero determinations). Data-quality
    /// conditions that do not invalidate the run come back as warnings.
    pub fn evaluate(&self, data: &ProjectData) -> Result<Evaluation> {
        data.project.validate()?;

        let reading_set = data.reading_set();
        let mut enriched = Vec::new();
        let mut warnings = Vec::new();

        for measurement in &data.measurements {
            let station = self.resolver.matching_station(&data.stations, measurement)?;

            for reading in reading_set.for_station(measurement.estacion_km) {
                let Some(lectura_mira) = reading.lectura_mira else {
                    warnings.push(EvaluationWarning::PendingReading {
                        estacion_km: reading.estacion_km,
                        division_transversal: reading.division_transversal,
                    });
                    continue;
                };
                if !data.project.has_division(reading.division_transversal) {
                    return Err(RasanteError::UnknownDivision {
                        estacion_km: reading.estacion_km,
                        division_transversal: reading.division_transversal,
                    });
                }

                let resolved =
                    self.resolver
                        .resolve(&data.project, &data.stations, measurement, reading)?;
                let classification = classify(
                    resolved.elv_base_real,
                    resolved.elv_base_proyecto,
                    data.project.tolerancia_sct,
                );

                enriched.push(EnrichedReading {
                    estacion_km: station.km,
                    division_transversal: reading.division_transversal,
                    lectura_mira,
                    altura_aparato: measurement.altura_aparato(),
                    elv_base_real: resolved.elv_base_real,
                    elv_base_proyecto: resolved.elv_base_proyecto,
                    elv_concreto_proyecto: resolved.elv_concreto_proyecto,
                    diferencia: classification.diferencia,
                    clasificacion: classification.clasificacion,
                    calidad: classification.calidad,
                    cumple_tolerancia: classification.cumple_tolerancia,
                });
            }
        }

        // Readings whose station was never visited cannot be resolved;
        // surface them instead of dropping them on the floor.
        for reading in reading_set.iter() {
            let visited = data.measurements.iter().any(|m| {
                (m.estacion_km - reading.estacion_km).abs() <= STATION_MATCH_TOLERANCE
            });
            if !visited {
                warnings.push(EvaluationWarning::ReadingWithoutMeasurement {
                    estacion_km: reading.estacion_km,
                    division_transversal: reading.division_transversal,
                });
            }
        }

        let station_kms: Vec<f64> = data
            .measurements
            .iter()
            .map(|m| {
                find_station(&data.stations, m.estacion_km)
                    .map(|s| s.km)
                    .unwrap_or(m.estacion_km)
            })
            .collect();
        let aggregation = self
            .aggregator
            .aggregate(&data.project, &station_kms, &enriched)?;
        warnings.extend(
            aggregation
                .incomplete_stations
                .iter()
                .map(|&km| EvaluationWarning::StationIncomplete { estacion_km: km }),
        );

        let summary = evaluate_project(&aggregation.rows, &data.project)?;
        let anomalies = self.detector.detect(&reading_set);

        Ok(Evaluation {
            readings: enriched,
            stations: aggregation.rows,
            summary,
            anomalies,
            warnings,
        })
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
