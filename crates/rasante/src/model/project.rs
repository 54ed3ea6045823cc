//! Project configuration: the longitudinal design parameters.

use serde::{Deserialize, Serialize};

use crate::error::{RasanteError, Result};
use crate::model::station::TheoreticalStation;

/// Tolerance used when matching a transverse division against the
/// project's configured offsets, in meters.
pub const DIVISION_MATCH_TOLERANCE: f64 = 0.001;

/// Longitudinal design parameters of a pavement-base project.
///
/// Chainages (`km_inicial`, `km_final`, `intervalo`) are expressed in
/// meters of cadenamiento: station 1+250 is stored as `1250.0`. All
/// elevations, thicknesses and tolerances are in meters.
///
/// A project is immutable once stations and measurements exist; every
/// derived number downstream is a pure function of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project name, used only for display.
    pub nombre: String,
    /// Start chainage.
    pub km_inicial: f64,
    /// End chainage. Must be greater than `km_inicial`.
    pub km_final: f64,
    /// Station spacing along the alignment. Must be positive.
    pub intervalo: f64,
    /// Nominal design layer thickness. Must be positive.
    pub espesor: f64,
    /// Regulatory (SCT) allowed ± deviation between as-built and design
    /// elevation. Must be positive.
    pub tolerancia_sct: f64,
    /// Transverse offsets left of the centerline, all <= 0, ascending.
    pub divisiones_izquierdas: Vec<f64>,
    /// Transverse offsets right of the centerline, all >= 0, ascending.
    pub divisiones_derechas: Vec<f64>,
}

impl Project {
    /// Check the structural invariants of the configuration.
    ///
    /// The engine refuses to operate on an invalid project; every entry
    /// point calls this before computing anything.
    pub fn validate(&self) -> Result<()> {
        // NaN compares false against every bound below, so finiteness
        // has to be checked first or a NaN parameter sails through.
        let numeric = [
            ("km_inicial", self.km_inicial),
            ("km_final", self.km_final),
            ("intervalo", self.intervalo),
            ("espesor", self.espesor),
            ("tolerancia_sct", self.tolerancia_sct),
        ];
        for (name, value) in numeric {
            if !value.is_finite() {
                return Err(RasanteError::ProjectConfig(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }
        if self.divisiones().any(|d| !d.is_finite()) {
            return Err(RasanteError::ProjectConfig(
                "transverse divisions must be finite numbers".to_string(),
            ));
        }
        if self.km_final <= self.km_inicial {
            return Err(RasanteError::ProjectConfig(format!(
                "km_final ({}) must be greater than km_inicial ({})",
                self.km_final, self.km_inicial
            )));
        }
        if self.intervalo <= 0.0 {
            return Err(RasanteError::ProjectConfig(format!(
                "intervalo must be positive, got {}",
                self.intervalo
            )));
        }
        if self.espesor <= 0.0 {
            return Err(RasanteError::ProjectConfig(format!(
                "espesor must be positive, got {}",
                self.espesor
            )));
        }
        if self.tolerancia_sct <= 0.0 {
            return Err(RasanteError::ProjectConfig(format!(
                "tolerancia_sct must be positive, got {}",
                self.tolerancia_sct
            )));
        }
        if self.divisiones_izquierdas.iter().any(|&d| d > 0.0) {
            return Err(RasanteError::ProjectConfig(
                "divisiones_izquierdas must all be <= 0".to_string(),
            ));
        }
        if self.divisiones_derechas.iter().any(|&d| d < 0.0) {
            return Err(RasanteError::ProjectConfig(
                "divisiones_derechas must all be >= 0".to_string(),
            ));
        }
        for divs in [&self.divisiones_izquierdas, &self.divisiones_derechas] {
            if divs.windows(2).any(|w| w[0] >= w[1]) {
                return Err(RasanteError::ProjectConfig(
                    "transverse divisions must be strictly ascending".to_string(),
                ));
            }
        }
        if self.divisiones_izquierdas.is_empty() && self.divisiones_derechas.is_empty() {
            return Err(RasanteError::ProjectConfig(
                "at least one transverse division is required".to_string(),
            ));
        }
        Ok(())
    }

    /// All configured transverse offsets, left to right.
    ///
    /// The centerline (offset 0) is included only if it is an explicit
    /// member of one of the division lists.
    pub fn divisiones(&self) -> impl Iterator<Item = f64> + '_ {
        self.divisiones_izquierdas
            .iter()
            .chain(self.divisiones_derechas.iter())
            .copied()
    }

    /// Whether `offset` matches one of the configured divisions.
    pub fn has_division(&self, offset: f64) -> bool {
        self.divisiones()
            .any(|d| (d - offset).abs() <= DIVISION_MATCH_TOLERANCE)
    }

    /// Design station chainages from `km_inicial` to `km_final` at
    /// `intervalo` spacing, end point included when it falls on the grid.
    pub fn station_kms(&self) -> Vec<f64> {
        let span = self.km_final - self.km_inicial;
        // Integer step count avoids float accumulation over long alignments.
        let steps = (span / self.intervalo + 1e-9).floor() as usize;
        (0..=steps)
            .map(|i| self.km_inicial + i as f64 * self.intervalo)
            .collect()
    }

    /// Batch-generate the theoretical station list from the km range.
    ///
    /// `design` maps a chainage to its centerline design elevation and
    /// cross-slope, typically a closure over the imported design profile.
    pub fn generate_stations<F>(&self, design: F) -> Vec<TheoreticalStation>
    where
        F: Fn(f64) -> (f64, f64),
    {
        self.station_kms()
            .into_iter()
            .map(|km| {
                let (base_cl, pendiente_derecha) = design(km);
                TheoreticalStation {
                    km,
                    base_cl,
                    pendiente_derecha,
                    pendiente_izquierda: None,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        Project {
            nombre: "Tramo de prueba".to_string(),
            km_inicial: 0.0,
            km_final: 100.0,
            intervalo: 20.0,
            espesor: 0.25,
            tolerancia_sct: 0.005,
            divisiones_izquierdas: vec![-3.75, -1.875],
            divisiones_derechas: vec![0.0, 1.875, 3.75],
        }
    }

    #[test]
    fn test_valid_project_passes() {
        assert!(sample_project().validate().is_ok());
    }

    #[test]
    fn test_reversed_km_range_rejected() {
        let mut p = sample_project();
        p.km_final = -50.0;
        assert!(matches!(
            p.validate(),
            Err(RasanteError::ProjectConfig(_))
        ));
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        for nan_field in 0..3 {
            let mut p = sample_project();
            match nan_field {
                0 => p.espesor = f64::NAN,
                1 => p.tolerancia_sct = f64::NAN,
                _ => p.intervalo = f64::INFINITY,
            }
            assert!(matches!(
                p.validate(),
                Err(RasanteError::ProjectConfig(_))
            ));
        }
    }

    #[test]
    fn test_non_finite_division_rejected() {
        let mut p = sample_project();
        p.divisiones_derechas = vec![0.0, f64::NAN];
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_positive_offset_on_left_rejected() {
        let mut p = sample_project();
        p.divisiones_izquierdas = vec![-3.75, 1.0];
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_unsorted_divisions_rejected() {
        let mut p = sample_project();
        p.divisiones_derechas = vec![3.75, 1.875];
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_station_kms_include_endpoint() {
        let kms = sample_project().station_kms();
        assert_eq!(kms.len(), 6);
        assert_eq!(kms[0], 0.0);
        assert_eq!(kms[5], 100.0);
    }

    #[test]
    fn test_generate_stations_uses_design_profile() {
        let stations = sample_project().generate_stations(|km| (1880.0 + km * 0.01, -0.02));
        assert_eq!(stations.len(), 6);
        assert_eq!(stations[2].km, 40.0);
        assert_eq!(stations[2].base_cl, 1880.4);
        assert_eq!(stations[2].pendiente_derecha, -0.02);
    }

    #[test]
    fn test_has_division_with_tolerance() {
        let p = sample_project();
        assert!(p.has_division(1.875));
        assert!(p.has_division(1.8751));
        assert!(!p.has_division(2.5));
    }
}
