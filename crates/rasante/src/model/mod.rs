//! Canonical data model: project configuration, design stations, field
//! measurements and rod readings.
//!
//! One schema, no aliases: every derived number downstream is a pure
//! function of these records.

mod measurement;
mod project;
mod station;

pub use measurement::{Measurement, Reading, ReadingSet};
pub use project::{DIVISION_MATCH_TOLERANCE, Project};
pub use station::{STATION_MATCH_TOLERANCE, TheoreticalStation, find_station};
