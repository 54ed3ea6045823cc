//! Tolerance classification and quality grading of a single reading.

use serde::{Deserialize, Serialize};

/// Conformance class of a reading against the SCT tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Clasificacion {
    /// Within ± tolerance (closed interval).
    Cumple,
    /// Built surface too high: excess material, requires cutting.
    Corte,
    /// Built surface too low: deficit, requires fill.
    Terraplen,
}

impl Clasificacion {
    pub fn label(&self) -> &'static str {
        match self {
            Clasificacion::Cumple => "CUMPLE",
            Clasificacion::Corte => "CORTE",
            Clasificacion::Terraplen => "TERRAPLEN",
        }
    }
}

/// Quality grade of a reading, an axis independent from conformance,
/// used for field-review triage. Ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Calidad {
    /// |diferencia| <= 0.5 t
    Excelente,
    /// |diferencia| <= t
    Buena,
    /// |diferencia| <= 2 t
    Regular,
    /// |diferencia| > 2 t
    Revisar,
}

impl Calidad {
    pub fn label(&self) -> &'static str {
        match self {
            Calidad::Excelente => "EXCELENTE",
            Calidad::Buena => "BUENA",
            Calidad::Regular => "REGULAR",
            Calidad::Revisar => "REVISAR",
        }
    }
}

/// Result of classifying one reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// `elv_base_real - elv_base_proyecto`.
    pub diferencia: f64,
    pub clasificacion: Clasificacion,
    pub cumple_tolerancia: bool,
    pub calidad: Calidad,
}

/// A reading with every derived field populated: the per-reading record
/// consumed by the aggregator, the report renderer and live tables.
///
/// All fields are stored unrounded; rounding happens only at display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedReading {
    pub estacion_km: f64,
    pub division_transversal: f64,
    pub lectura_mira: f64,
    /// Instrument height of the station visit this reading belongs to.
    pub altura_aparato: f64,
    pub elv_base_real: f64,
    pub elv_base_proyecto: f64,
    pub elv_concreto_proyecto: f64,
    pub diferencia: f64,
    pub clasificacion: Clasificacion,
    pub calidad: Calidad,
    pub cumple_tolerancia: bool,
}

/// Compare a real elevation against the theoretical one under the SCT
/// tolerance.
///
/// A `diferencia` exactly equal to ± `tolerancia_sct` is CUMPLE: the
/// tolerance interval is closed.
pub fn classify(elv_base_real: f64, elv_base_proyecto: f64, tolerancia_sct: f64) -> Classification {
    let diferencia = elv_base_real - elv_base_proyecto;
    let cumple_tolerancia = diferencia.abs() <= tolerancia_sct;

    let clasificacion = if cumple_tolerancia {
        Clasificacion::Cumple
    } else if diferencia > tolerancia_sct {
        Clasificacion::Corte
    } else {
        Clasificacion::Terraplen
    };

    let magnitud = diferencia.abs();
    let calidad = if magnitud <= 0.5 * tolerancia_sct {
        Calidad::Excelente
    } else if magnitud <= tolerancia_sct {
        Calidad::Buena
    } else if magnitud <= 2.0 * tolerancia_sct {
        Calidad::Regular
    } else {
        Calidad::Revisar
    };

    Classification {
        diferencia,
        clasificacion,
        cumple_tolerancia,
        calidad,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: f64 = 0.005;

    #[test]
    fn test_zero_difference_is_cumple_excelente() {
        let c = classify(1883.180, 1883.180, T);
        assert_eq!(c.diferencia, 0.0);
        assert_eq!(c.clasificacion, Clasificacion::Cumple);
        assert_eq!(c.calidad, Calidad::Excelente);
        assert!(c.cumple_tolerancia);
    }

    #[test]
    fn test_boundary_is_closed_interval() {
        // Inputs chosen so the subtraction yields exactly +/- T in f64;
        // an offset from a large base like 1883.180 rounds past T.
        let c = classify(T, 0.0, T);
        assert!(c.cumple_tolerancia);
        assert_eq!(c.clasificacion, Clasificacion::Cumple);

        let c = classify(-T, 0.0, T);
        assert!(c.cumple_tolerancia);
        assert_eq!(c.clasificacion, Clasificacion::Cumple);
    }

    #[test]
    fn test_just_past_tolerance_is_corte() {
        let c = classify(1883.180 + T + 1e-6, 1883.180, T);
        assert!(!c.cumple_tolerancia);
        assert_eq!(c.clasificacion, Clasificacion::Corte);
    }

    #[test]
    fn test_deficit_is_terraplen() {
        let c = classify(1883.180 - 0.012, 1883.180, T);
        assert!(!c.cumple_tolerancia);
        assert_eq!(c.clasificacion, Clasificacion::Terraplen);
    }

    #[test]
    fn test_quality_bands() {
        assert_eq!(classify(0.002, 0.0, T).calidad, Calidad::Excelente);
        assert_eq!(classify(0.0025, 0.0, T).calidad, Calidad::Excelente);
        assert_eq!(classify(0.004, 0.0, T).calidad, Calidad::Buena);
        assert_eq!(classify(0.005, 0.0, T).calidad, Calidad::Buena);
        assert_eq!(classify(0.008, 0.0, T).calidad, Calidad::Regular);
        assert_eq!(classify(0.010, 0.0, T).calidad, Calidad::Regular);
        assert_eq!(classify(0.011, 0.0, T).calidad, Calidad::Revisar);
    }

    #[test]
    fn test_quality_is_symmetric_in_sign() {
        assert_eq!(classify(-0.006, 0.0, T).calidad, classify(0.006, 0.0, T).calidad);
    }

    #[test]
    fn test_quality_ordering() {
        assert!(Calidad::Excelente < Calidad::Buena);
        assert!(Calidad::Buena < Calidad::Regular);
        assert!(Calidad::Regular < Calidad::Revisar);
    }
}
