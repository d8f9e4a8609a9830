//! terrametrics: raster-polygon spatial measurement
//!
//! Computes geodesic area, perimeter, cut/fill volume, and elevation
//! statistics for a GeoJSON polygon against a DSM (Digital Surface Model)
//! raster. Every operation is a pure function from (polygon, raster path,
//! optional base elevation) to a result record or a typed failure; nothing
//! is cached or persisted between calls, so measurements are reproducible.

pub mod core;
pub mod io;
pub mod measure;
pub mod types;

#[cfg(feature = "python")]
mod python;

// Re-export main types and functions for easier access
pub use measure::Measurement;
pub use types::{
    BoundingBox, CalculationMethod, ElevationReport, ElevationStats, ElevationWindow,
    GeoTransform, MeasureError, MeasureResult, MeasurementMetadata, MeasurementResult,
    ProfileStats,
};

pub use self::core::{polygon_area, AreaSummary, VolumeSummary};
pub use self::io::DsmReader;
