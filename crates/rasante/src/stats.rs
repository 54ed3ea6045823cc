//! Project-level statistics, SCT acceptance criteria and the
//! CONFORME / NO CONFORME verdict.

use serde::{Deserialize, Serialize};

use crate::aggregate::StationRow;
use crate::error::{RasanteError, Result};
use crate::model::Project;

/// Upper zone band: a determination more than this many meters above the
/// design thickness counts as excess fill. Regulatory constant.
pub const ZONA_SOBRE_ESPESOR: f64 = 0.001;

/// Lower zone band: a determination more than this many meters below the
/// design thickness counts as insufficient thickness. Regulatory constant.
pub const ZONA_BAJO_ESPESOR: f64 = 0.004;

/// The mean determination must reach this fraction of the design
/// thickness for the averages criterion to pass.
pub const FRACCION_PROMEDIO_MINIMO: f64 = 0.98;

/// The standard deviation must stay under this fraction of the design
/// thickness for the dispersion criterion to pass.
pub const FRACCION_DESVIACION_MAXIMA: f64 = 0.10;

/// Minimum share of in-tolerance determinations for a CONFORME verdict.
pub const FRACCION_CONFORMIDAD: f64 = 0.95;

/// Overall project-level pass/fail verdict on layer-thickness conformance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoInspeccion {
    Conforme,
    NoConforme,
}

impl EstadoInspeccion {
    pub fn label(&self) -> &'static str {
        match self {
            EstadoInspeccion::Conforme => "CONFORME",
            EstadoInspeccion::NoConforme => "NO CONFORME",
        }
    }
}

/// Statistics, conformance and volumetric rollup for the whole project.
///
/// The sole statistics input consumed by the certification report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Number of determinations (per-station thickness means).
    pub num_determinaciones: usize,
    pub dato_maximo: f64,
    pub dato_minimo: f64,
    pub dato_promedio: f64,
    /// Population standard deviation (divide by n, not n-1), matching
    /// the regulatory workbook's convention.
    pub desviacion_estandar: f64,
    /// Averages criterion: `dato_promedio >= 0.98 * espesor`.
    pub cumple_promedio: bool,
    /// Dispersion criterion: `desviacion_estandar <= 0.10 * espesor`.
    pub cumple_desviacion: bool,
    /// Determinations above `espesor + ZONA_SOBRE_ESPESOR`.
    pub zona_relleno_excesivo: usize,
    /// Determinations within `[espesor - ZONA_BAJO_ESPESOR, espesor + ZONA_SOBRE_ESPESOR]`.
    pub zona_dentro_tolerancia: usize,
    /// Determinations below `espesor - ZONA_BAJO_ESPESOR`.
    pub zona_espesor_insuficiente: usize,
    pub estado_inspeccion: EstadoInspeccion,
    pub volumen_proyecto: f64,
    pub volumen_real: f64,
    pub volumen_excedente: f64,
}

/// Evaluate the project statistics and conformance verdict over the
/// per-station rows.
///
/// Fails with [`RasanteError::InsufficientData`] when there are no
/// determinations: a pass/fail engineering verdict must never be built
/// on silently-substituted zeros.
pub fn evaluate_project(rows: &[StationRow], project: &Project) -> Result<ProjectSummary> {
    if rows.is_empty() {
        return Err(RasanteError::InsufficientData(
            "no station determinations available for project statistics".to_string(),
        ));
    }

    let determinaciones: Vec<f64> = rows.iter().map(|r| r.espesor_promedio).collect();
    let n = determinaciones.len();

    let dato_maximo = determinaciones.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let dato_minimo = determinaciones.iter().copied().fold(f64::INFINITY, f64::min);
    let dato_promedio = determinaciones.iter().sum::<f64>() / n as f64;
    let varianza = determinaciones
        .iter()
        .map(|d| (d - dato_promedio).powi(2))
        .sum::<f64>()
        / n as f64;
    let desviacion_estandar = varianza.sqrt();

    let espesor = project.espesor;
    let cumple_promedio = dato_promedio >= FRACCION_PROMEDIO_MINIMO * espesor;
    let cumple_desviacion = desviacion_estandar <= FRACCION_DESVIACION_MAXIMA * espesor;

    let mut zona_relleno_excesivo = 0;
    let mut zona_dentro_tolerancia = 0;
    let mut zona_espesor_insuficiente = 0;
    for &d in &determinaciones {
        if d > espesor + ZONA_SOBRE_ESPESOR {
            zona_relleno_excesivo += 1;
        } else if d < espesor - ZONA_BAJO_ESPESOR {
            zona_espesor_insuficiente += 1;
        } else {
            zona_dentro_tolerancia += 1;
        }
    }

    let estado_inspeccion = if zona_dentro_tolerancia as f64 / n as f64 > FRACCION_CONFORMIDAD {
        EstadoInspeccion::Conforme
    } else {
        EstadoInspeccion::NoConforme
    };

    let volumen_proyecto: f64 = rows.iter().map(|r| r.volumen_parcial_proyecto).sum();
    let volumen_real: f64 = rows.iter().map(|r| r.volumen_parcial_real).sum();

    Ok(ProjectSummary {
        num_determinaciones: n,
        dato_maximo,
        dato_minimo,
        dato_promedio,
        desviacion_estandar,
        cumple_promedio,
        cumple_desviacion,
        zona_relleno_excesivo,
        zona_dentro_tolerancia,
        zona_espesor_insuficiente,
        estado_inspeccion,
        volumen_proyecto,
        volumen_real,
        volumen_excedente: volumen_real - volumen_proyecto,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project {
            nombre: "t".to_string(),
            km_inicial: 0.0,
            km_final: 100.0,
            intervalo: 20.0,
            espesor: 0.25,
            tolerancia_sct: 0.005,
            divisiones_izquierdas: vec![-3.75],
            divisiones_derechas: vec![0.0, 3.75],
        }
    }

    fn row(km: f64, espesor_promedio: f64) -> StationRow {
        let area = 150.0;
        StationRow {
            estacion_km: km,
            num_lecturas: 3,
            espesor_promedio,
            area,
            volumen_parcial_real: espesor_promedio * area,
            volumen_parcial_proyecto: 0.25 * area,
            volumen_acumulado_real: 0.0,
            volumen_acumulado_proyecto: 0.0,
        }
    }

    #[test]
    fn test_empty_rows_is_insufficient_data() {
        let err = evaluate_project(&[], &project()).unwrap_err();
        assert!(matches!(err, RasanteError::InsufficientData(_)));
    }

    #[test]
    fn test_statistics_over_determinations() {
        let rows = vec![row(0.0, 0.248), row(20.0, 0.250), row(40.0, 0.252)];
        let s = evaluate_project(&rows, &project()).unwrap();

        assert_eq!(s.num_determinaciones, 3);
        assert!((s.dato_promedio - 0.250).abs() < 1e-12);
        assert_eq!(s.dato_maximo, 0.252);
        assert_eq!(s.dato_minimo, 0.248);
        // Population std dev of {-0.002, 0, 0.002} around the mean.
        let expected = (2.0 * 0.002_f64.powi(2) / 3.0).sqrt();
        assert!((s.desviacion_estandar - expected).abs() < 1e-12);
    }

    #[test]
    fn test_acceptance_criteria() {
        let rows = vec![row(0.0, 0.250), row(20.0, 0.250)];
        let s = evaluate_project(&rows, &project()).unwrap();
        assert!(s.cumple_promedio);
        assert!(s.cumple_desviacion);

        // Mean below 98% of design thickness fails the averages criterion.
        let rows = vec![row(0.0, 0.240), row(20.0, 0.240)];
        let s = evaluate_project(&rows, &project()).unwrap();
        assert!(!s.cumple_promedio);
    }

    #[test]
    fn test_zone_buckets_use_regulatory_bands() {
        let rows = vec![
            row(0.0, 0.252),  // above espesor + 0.001: excess
            row(20.0, 0.251), // exactly espesor + 0.001: in tolerance
            row(40.0, 0.246), // exactly espesor - 0.004: in tolerance
            row(60.0, 0.245), // below espesor - 0.004: insufficient
        ];
        let s = evaluate_project(&rows, &project()).unwrap();
        assert_eq!(s.zona_relleno_excesivo, 1);
        assert_eq!(s.zona_dentro_tolerancia, 2);
        assert_eq!(s.zona_espesor_insuficiente, 1);
        assert_eq!(s.estado_inspeccion, EstadoInspeccion::NoConforme);
    }

    #[test]
    fn test_conforme_requires_strictly_more_than_95_percent() {
        // 19 of 20 in tolerance: exactly 0.95, not strictly greater.
        let mut rows: Vec<StationRow> = (0..19).map(|i| row(i as f64 * 20.0, 0.250)).collect();
        rows.push(row(19.0 * 20.0, 0.260));
        let s = evaluate_project(&rows, &project()).unwrap();
        assert_eq!(s.estado_inspeccion, EstadoInspeccion::NoConforme);

        // All in tolerance.
        let rows: Vec<StationRow> = (0..20).map(|i| row(i as f64 * 20.0, 0.250)).collect();
        let s = evaluate_project(&rows, &project()).unwrap();
        assert_eq!(s.estado_inspeccion, EstadoInspeccion::Conforme);
    }

    #[test]
    fn test_volumetric_rollup() {
        let rows = vec![row(0.0, 0.250), row(20.0, 0.252)];
        let s = evaluate_project(&rows, &project()).unwrap();
        assert!((s.volumen_proyecto - 75.0).abs() < 1e-9);
        assert!((s.volumen_real - (0.250 + 0.252) * 150.0).abs() < 1e-9);
        assert!((s.volumen_excedente - (s.volumen_real - s.volumen_proyecto)).abs() < 1e-12);
    }
}
