//! Advisory anomaly detection over raw rod-reading sequences.
//!
//! Findings here are field-quality alerts for human review. They never
//! block the classification/aggregation pipeline and are returned
//! alongside normal output, not as errors.

use serde::{Deserialize, Serialize};

use crate::model::{Reading, ReadingSet};

/// Kind of anomaly detected in a reading sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyKind {
    /// Statistical outlier against the whole reading set.
    ValorExtremo,
    /// Abrupt jump between spatially consecutive readings.
    SaltoBrusco,
    /// Rod reading beyond the absolute physical maximum.
    LecturaImposible,
}

impl AnomalyKind {
    pub fn label(&self) -> &'static str {
        match self {
            AnomalyKind::ValorExtremo => "VALOR_EXTREMO",
            AnomalyKind::SaltoBrusco => "SALTO_BRUSCO",
            AnomalyKind::LecturaImposible => "LECTURA_IMPOSIBLE",
        }
    }
}

/// Severity of a finding, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalySeverity {
    Info,
    Alerta,
    Critica,
}

impl AnomalySeverity {
    pub fn label(&self) -> &'static str {
        match self {
            AnomalySeverity::Info => "INFO",
            AnomalySeverity::Alerta => "ALERTA",
            AnomalySeverity::Critica => "CRITICA",
        }
    }
}

/// One advisory finding over a raw reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub kind: AnomalyKind,
    pub severity: AnomalySeverity,
    pub estacion_km: f64,
    pub division_transversal: f64,
    pub lectura_mira: f64,
    pub descripcion: String,
}

/// Thresholds for the anomaly detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyConfig {
    /// Standard deviations beyond the mean for VALOR_EXTREMO.
    pub k_desviaciones: f64,
    /// Absolute jump between consecutive offsets for SALTO_BRUSCO, in
    /// meters. Severity escalates past twice this value.
    pub umbral_salto: f64,
    /// Absolute physical maximum rod reading, in meters.
    pub maximo_fisico: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            k_desviaciones: 2.0,
            umbral_salto: 1.0,
            maximo_fisico: 5.0,
        }
    }
}

/// Flags statistical outliers, abrupt jumps and physically impossible
/// readings in a raw reading sequence.
#[derive(Debug, Clone, Default)]
pub struct AnomalyDetector {
    config: AnomalyConfig,
}

impl AnomalyDetector {
    pub fn new(config: AnomalyConfig) -> Self {
        Self { config }
    }

    /// Detect anomalies over the captured readings of a set.
    ///
    /// Pending readings carry no value and are ignored.
    pub fn detect(&self, readings: &ReadingSet) -> Vec<Anomaly> {
        // Pair each captured reading with its value up front so no later
        // step has to re-unwrap the option.
        let captured: Vec<(&Reading, f64)> = readings
            .iter()
            .filter_map(|r| r.lectura_mira.map(|v| (r, v)))
            .collect();

        let mut anomalies = Vec::new();
        self.detect_impossible(&captured, &mut anomalies);
        self.detect_extremes(&captured, &mut anomalies);
        self.detect_jumps(readings, &captured, &mut anomalies);
        anomalies
    }

    /// LECTURA_IMPOSIBLE: beyond the physical maximum, always critical.
    fn detect_impossible(&self, captured: &[(&Reading, f64)], out: &mut Vec<Anomaly>) {
        for &(r, lectura) in captured {
            if lectura > self.config.maximo_fisico {
                out.push(self.anomaly(
                    r,
                    lectura,
                    AnomalyKind::LecturaImposible,
                    AnomalySeverity::Critica,
                    format!(
                        "rod reading {lectura} exceeds the physical maximum of {} m",
                        self.config.maximo_fisico
                    ),
                ));
            }
        }
    }

    /// VALOR_EXTREMO: |x - mean| > k * stddev over the full reading set.
    fn detect_extremes(&self, captured: &[(&Reading, f64)], out: &mut Vec<Anomaly>) {
        // A meaningful deviation needs at least three points.
        if captured.len() < 3 {
            return;
        }
        let n = captured.len() as f64;
        let mean = captured.iter().map(|&(_, v)| v).sum::<f64>() / n;
        let std = (captured
            .iter()
            .map(|&(_, v)| (v - mean).powi(2))
            .sum::<f64>()
            / n)
            .sqrt();
        if std == 0.0 {
            return;
        }

        for &(r, lectura) in captured {
            let desvio = (lectura - mean).abs();
            if desvio > self.config.k_desviaciones * std {
                out.push(self.anomaly(
                    r,
                    lectura,
                    AnomalyKind::ValorExtremo,
                    AnomalySeverity::Alerta,
                    format!(
                        "rod reading {lectura} deviates {:.1} standard deviations from the set mean {mean:.3}",
                        desvio / std
                    ),
                ));
            }
        }
    }

    /// SALTO_BRUSCO: abrupt change between spatially consecutive readings
    /// (ordered by transverse offset) within each station.
    fn detect_jumps(
        &self,
        readings: &ReadingSet,
        captured: &[(&Reading, f64)],
        out: &mut Vec<Anomaly>,
    ) {
        let mut station_kms: Vec<f64> = Vec::new();
        for &(r, _) in captured {
            if !station_kms
                .iter()
                .any(|&km| (km - r.estacion_km).abs() < 1e-9)
            {
                station_kms.push(r.estacion_km);
            }
        }

        for km in station_kms {
            let row: Vec<(&Reading, f64)> = readings
                .for_station(km)
                .into_iter()
                .filter_map(|r| r.lectura_mira.map(|v| (r, v)))
                .collect();
            for pair in row.windows(2) {
                let (ra, a) = pair[0];
                let (rb, b) = pair[1];
                let salto = (b - a).abs();
                if salto > self.config.umbral_salto {
                    let severity = if salto > 2.0 * self.config.umbral_salto {
                        AnomalySeverity::Critica
                    } else {
                        AnomalySeverity::Alerta
                    };
                    out.push(self.anomaly(
                        rb,
                        b,
                        AnomalyKind::SaltoBrusco,
                        severity,
                        format!(
                            "jump of {salto:.3} m from division {} to {}",
                            ra.division_transversal, rb.division_transversal
                        ),
                    ));
                }
            }
        }
    }

    fn anomaly(
        &self,
        reading: &Reading,
        lectura_mira: f64,
        kind: AnomalyKind,
        severity: AnomalySeverity,
        descripcion: String,
    ) -> Anomaly {
        Anomaly {
            kind,
            severity,
            estacion_km: reading.estacion_km,
            division_transversal: reading.division_transversal,
            lectura_mira,
            descripcion,
        }
    }
}
