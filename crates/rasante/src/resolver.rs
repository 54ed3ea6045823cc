//! Elevation resolver: benchmark + rod reading to absolute elevations.

use serde::{Deserialize, Serialize};

use crate::error::{RasanteError, Result};
use crate::geometry;
use crate::model::{
    Measurement, Project, Reading, STATION_MATCH_TOLERANCE, TheoreticalStation, find_station,
};

/// Default upper bound for a sane rod reading, in meters. Readings above
/// this are rejected as invalid rather than resolved.
pub const DEFAULT_MAX_LECTURA_MIRA: f64 = 10.0;

/// Absolute elevations resolved for one rod reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedElevations {
    /// As-built base elevation: instrument height minus rod reading.
    pub elv_base_real: f64,
    /// Theoretical base elevation at the reading's offset.
    pub elv_base_proyecto: f64,
    /// Theoretical finished-concrete elevation at the reading's offset.
    pub elv_concreto_proyecto: f64,
}

/// Converts a benchmark configuration and rod readings into absolute
/// real-world elevations for a station.
#[derive(Debug, Clone)]
pub struct ElevationResolver {
    max_lectura_mira: f64,
}

impl ElevationResolver {
    pub fn new(max_lectura_mira: f64) -> Self {
        Self { max_lectura_mira }
    }

    /// Resolve the elevations for one captured reading.
    ///
    /// Fails with [`RasanteError::MissingStation`] when the measurement's
    /// chainage has no matching design station, and with
    /// [`RasanteError::InvalidReading`] when the rod reading is out of
    /// physical bounds. A pending reading (no `lectura_mira`) is an
    /// invalid input here; the caller filters those out beforehand.
    pub fn resolve(
        &self,
        project: &Project,
        stations: &[TheoreticalStation],
        measurement: &Measurement,
        reading: &Reading,
    ) -> Result<ResolvedElevations> {
        let station = self.matching_station(stations, measurement)?;
        if !measurement.bn_altura.is_finite() || !measurement.bn_lectura.is_finite() {
            return Err(RasanteError::InvalidMeasurement {
                estacion_km: measurement.estacion_km,
                reason: format!(
                    "benchmark fields must be finite, got bn_altura {}, bn_lectura {}",
                    measurement.bn_altura, measurement.bn_lectura
                ),
            });
        }
        let lectura_mira = reading.lectura_mira.ok_or_else(|| {
            self.invalid_reading(reading, 0.0, "reading is pending, no rod value captured")
        })?;

        // Checked before the bounds: NaN compares false against both.
        if !lectura_mira.is_finite() {
            return Err(self.invalid_reading(
                reading,
                lectura_mira,
                "rod reading must be a finite number",
            ));
        }
        if lectura_mira <= 0.0 {
            return Err(self.invalid_reading(
                reading,
                lectura_mira,
                "rod reading must be positive",
            ));
        }
        if lectura_mira > self.max_lectura_mira {
            return Err(self.invalid_reading(
                reading,
                lectura_mira,
                &format!("rod reading exceeds maximum {} m", self.max_lectura_mira),
            ));
        }

        let elv_base_proyecto = geometry::theoretical_elevation(station, reading.division_transversal);
        Ok(ResolvedElevations {
            elv_base_real: measurement.altura_aparato() - lectura_mira,
            elv_base_proyecto,
            elv_concreto_proyecto: elv_base_proyecto + project.espesor,
        })
    }

    /// Find the design station for a measurement.
    pub fn matching_station<'a>(
        &self,
        stations: &'a [TheoreticalStation],
        measurement: &Measurement,
    ) -> Result<&'a TheoreticalStation> {
        find_station(stations, measurement.estacion_km).ok_or(RasanteError::MissingStation {
            estacion_km: measurement.estacion_km,
            tolerance: STATION_MATCH_TOLERANCE,
        })
    }

    fn invalid_reading(&self, reading: &Reading, lectura: f64, reason: &str) -> RasanteError {
        RasanteError::InvalidReading {
            estacion_km: reading.estacion_km,
            division_transversal: reading.division_transversal,
            lectura_mira: lectura,
            reason: reason.to_string(),
        }
    }
}

impl Default for ElevationResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LECTURA_MIRA)
    }
}
