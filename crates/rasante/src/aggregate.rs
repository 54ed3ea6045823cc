//! Per-station aggregation: thickness means, cross-sectional areas and
//! longitudinal volume integration.

use serde::{Deserialize, Serialize};

use crate::classify::EnrichedReading;
use crate::error::{RasanteError, Result};
use crate::model::{Project, STATION_MATCH_TOLERANCE};

/// Default effective pavement width, in meters. The legacy workbook
/// hardcoded this; here it is a named, overridable parameter.
pub const DEFAULT_ANCHO_PAVIMENTO: f64 = 7.5;

/// Volumetric row for one visited station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRow {
    pub estacion_km: f64,
    /// Number of valid readings behind this row.
    pub num_lecturas: usize,
    /// Mean `diferencia` over the station's valid readings.
    ///
    /// This is the effective as-built thickness delta, a proxy inherited
    /// from the source model: true layer thickness would require a
    /// before-paving elevation, which does not exist in this model.
    pub espesor_promedio: f64,
    /// Cross-sectional area governed by this station:
    /// `intervalo * ancho_pavimento`.
    pub area: f64,
    pub volumen_parcial_real: f64,
    pub volumen_parcial_proyecto: f64,
    pub volumen_acumulado_real: f64,
    pub volumen_acumulado_proyecto: f64,
}

/// Result of aggregating the visited stations.
#[derive(Debug, Clone, Default)]
pub struct StationAggregation {
    /// One row per station with at least one valid reading, in ascending
    /// km order.
    pub rows: Vec<StationRow>,
    /// Stations visited in the field but with no resolvable reading.
    /// They contribute no volume; the caller surfaces them as warnings
    /// rather than silently skipping them.
    pub incomplete_stations: Vec<f64>,
}

/// Computes per-station rows and the cumulative volume fold.
#[derive(Debug, Clone)]
pub struct StationAggregator {
    ancho_pavimento: f64,
}

impl StationAggregator {
    pub fn new(ancho_pavimento: f64) -> Self {
        Self { ancho_pavimento }
    }

    /// Aggregate the visited stations, in the order given.
    ///
    /// `station_kms` must be strictly ascending: the cumulative volumes
    /// are a sequential fold along the alignment, and an out-of-order
    /// station is a data error, not something to sort away silently.
    pub fn aggregate(
        &self,
        project: &Project,
        station_kms: &[f64],
        readings: &[EnrichedReading],
    ) -> Result<StationAggregation> {
        for pair in station_kms.windows(2) {
            if pair[1] <= pair[0] {
                return Err(RasanteError::OrderingViolation {
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }

        let area = project.intervalo * self.ancho_pavimento;
        let mut aggregation = StationAggregation::default();
        let mut acumulado_real = 0.0;
        let mut acumulado_proyecto = 0.0;

        for &km in station_kms {
            let station_readings: Vec<&EnrichedReading> = readings
                .iter()
                .filter(|r| (r.estacion_km - km).abs() <= STATION_MATCH_TOLERANCE)
                .collect();

            if station_readings.is_empty() {
                aggregation.incomplete_stations.push(km);
                continue;
            }

            let suma: f64 = station_readings.iter().map(|r| r.diferencia).sum();
            let espesor_promedio = suma / station_readings.len() as f64;
            let volumen_parcial_real = espesor_promedio * area;
            let volumen_parcial_proyecto = project.espesor * area;
            acumulado_real += volumen_parcial_real;
            acumulado_proyecto += volumen_parcial_proyecto;

            aggregation.rows.push(StationRow {
                estacion_km: km,
                num_lecturas: station_readings.len(),
                espesor_promedio,
                area,
                volumen_parcial_real,
                volumen_parcial_proyecto,
                volumen_acumulado_real: acumulado_real,
                volumen_acumulado_proyecto: acumulado_proyecto,
            });
        }

        Ok(aggregation)
    }
}

impl Default for StationAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_ANCHO_PAVIMENTO)
    }
}
