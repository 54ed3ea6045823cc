//! Theoretical design stations.

use serde::{Deserialize, Serialize};

/// Tolerance used when matching a measured chainage against a design
/// station, in chainage units (meters).
pub const STATION_MATCH_TOLERANCE: f64 = 0.001;

/// One design station: the theoretical cross-section at a chainage.
///
/// Read-only to the engine; created by design import or by
/// [`Project::generate_stations`](crate::Project::generate_stations).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TheoreticalStation {
    /// Chainage within the project range, aligned to the interval.
    pub km: f64,
    /// Centerline design elevation of the base surface.
    pub base_cl: f64,
    /// Cross-slope, a signed grade (m/m). The source model applies this
    /// single value to both sides of the centerline.
    pub pendiente_derecha: f64,
    /// Optional left-side cross-slope. When present it overrides
    /// `pendiente_derecha` for negative offsets, making asymmetric
    /// sections expressible; when absent the section behaves exactly
    /// like the legacy single-slope model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pendiente_izquierda: Option<f64>,
}

/// Find the design station matching `km` within [`STATION_MATCH_TOLERANCE`].
pub fn find_station(stations: &[TheoreticalStation], km: f64) -> Option<&TheoreticalStation> {
    stations
        .iter()
        .find(|s| (s.km - km).abs() <= STATION_MATCH_TOLERANCE)
}
