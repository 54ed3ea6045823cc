//! Linear cross-slope surface model.
//!
//! Maps (station, transverse offset) to a theoretical design elevation.
//! Offsets are not required to match a configured division, so these
//! functions also serve interpolation use-cases.

use crate::model::TheoreticalStation;

/// Theoretical base elevation at a transverse offset of a station:
/// `base_cl + offset * pendiente`.
///
/// The legacy model applies `pendiente_derecha` uniformly to both sides
/// of the centerline; a station may carry an explicit
/// `pendiente_izquierda` to override the left side.
pub fn theoretical_elevation(station: &TheoreticalStation, offset: f64) -> f64 {
    let pendiente = if offset < 0.0 {
        station
            .pendiente_izquierda
            .unwrap_or(station.pendiente_derecha)
    } else {
        station.pendiente_derecha
    };
    station.base_cl + offset * pendiente
}

/// Theoretical elevation of the finished concrete surface: the base
/// surface raised by the design layer thickness.
pub fn concrete_elevation(station: &TheoreticalStation, offset: f64, espesor: f64) -> f64 {
    theoretical_elevation(station, offset) + espesor
}
