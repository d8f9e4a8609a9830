//! Core measurement algorithms: polygon validation, geodesic area,
//! cut/fill volume, and elevation statistics.

pub mod area;
pub mod elevation;
pub mod geometry;
pub mod volume;

pub use area::{polygon_area, AreaSummary};
pub use volume::VolumeSummary;
