//! Field measurements: benchmark configuration and rod readings.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::station::STATION_MATCH_TOLERANCE;

/// One field visit to a station: the benchmark (banco de nivel)
/// configuration from which every rod reading at that station is resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    /// Chainage of the visited station. Must match a design station
    /// within [`STATION_MATCH_TOLERANCE`].
    pub estacion_km: f64,
    /// Absolute elevation of the benchmark.
    pub bn_altura: f64,
    /// Rod reading taken on the benchmark.
    pub bn_lectura: f64,
}

impl Measurement {
    /// Instrument height: `bn_altura + bn_lectura`.
    ///
    /// A pure function of the benchmark inputs, so it changes if and
    /// only if they do.
    pub fn altura_aparato(&self) -> f64 {
        self.bn_altura + self.bn_lectura
    }
}

/// One rod reading at a transverse offset within a station visit.
///
/// `lectura_mira` is `None` while the reading is pending (row created,
/// value not yet captured in the field). Pending readings are carried
/// through the pipeline as warnings, never as zeros.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    /// Chainage of the station this reading belongs to.
    pub estacion_km: f64,
    /// Transverse offset, one of the project's configured divisions.
    pub division_transversal: f64,
    /// Raw rod reading in meters, if captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lectura_mira: Option<f64>,
}

/// Key identifying a reading: (station, division) quantized to the
/// millimeter so float noise below the matching tolerance collapses to
/// the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ReadingKey {
    km_mm: i64,
    division_mm: i64,
}

impl ReadingKey {
    fn new(estacion_km: f64, division_transversal: f64) -> Self {
        Self {
            km_mm: (estacion_km * 1000.0).round() as i64,
            division_mm: (division_transversal * 1000.0).round() as i64,
        }
    }
}

/// An upsert collection of readings.
///
/// A reading is keyed uniquely by (station, division); re-submission at
/// the same key overwrites rather than duplicates, so recapturing a rod
/// reading in the field is idempotent. Insertion order of first
/// submission is preserved.
#[derive(Debug, Clone, Default)]
pub struct ReadingSet {
    readings: IndexMap<ReadingKey, Reading>,
}

impl ReadingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from readings in submission order, last write wins.
    pub fn from_readings(readings: impl IntoIterator<Item = Reading>) -> Self {
        let mut set = Self::new();
        for r in readings {
            set.upsert(r);
        }
        set
    }

    /// Insert or overwrite the reading at its (station, division) key.
    pub fn upsert(&mut self, reading: Reading) {
        let key = ReadingKey::new(reading.estacion_km, reading.division_transversal);
        self.readings.insert(key, reading);
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// All readings in first-submission order.
    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.values()
    }

    /// Readings belonging to the station at `estacion_km`, ordered by
    /// ascending transverse offset (left to right across the section).
    pub fn for_station(&self, estacion_km: f64) -> Vec<&Reading> {
        let mut rows: Vec<&Reading> = self
            .readings
            .values()
            .filter(|r| (r.estacion_km - estacion_km).abs() <= STATION_MATCH_TOLERANCE)
            .collect();
        rows.sort_by(|a, b| {
            a.division_transversal
                .partial_cmp(&b.division_transversal)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows
    }
}
