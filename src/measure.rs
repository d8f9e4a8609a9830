use crate::core::{area, elevation, geometry, volume};
use crate::io::DsmReader;
use crate::types::{
    CalculationMethod, ElevationReport, MeasureResult, MeasurementMetadata, MeasurementResult,
    Ring,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::path::{Path, PathBuf};

/// Confidence attached when real raster samples backed the measurement.
const RASTER_CONFIDENCE: f64 = 0.95;
/// Confidence attached when the simple degrees-to-meters fallback ran.
const APPROX_CONFIDENCE: f64 = 0.85;

/// Maximum length of offending input echoed back in error payloads.
const ERROR_INPUT_LIMIT: usize = 100;

fn default_crs() -> String {
    "EPSG:4326".to_string()
}

fn default_area_name() -> String {
    "Area Measurement".to_string()
}

fn default_volume_name() -> String {
    "Volume Measurement".to_string()
}

fn default_elevation_name() -> String {
    "Elevation Analysis".to_string()
}

/// A single measurement request.
///
/// Dispatch is a closed enum: the operation kind is decided by the variant,
/// not by a runtime name lookup. Each variant deserializes from the wire
/// shape used by the service layer (`polygon_coordinates`, `dsm_file_path`,
/// ...), with the same defaults the original tools applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Measurement {
    /// Geodesic area and perimeter of a polygon
    Area {
        polygon_coordinates: String,
        #[serde(default = "default_crs")]
        coordinate_system: String,
        #[serde(default = "default_area_name")]
        measurement_name: String,
    },
    /// Cut/fill volume of a polygon against a DSM
    Volume {
        polygon_coordinates: String,
        dsm_file_path: PathBuf,
        #[serde(default)]
        base_elevation: Option<f64>,
        #[serde(default = "default_volume_name")]
        measurement_name: String,
    },
    /// Elevation statistics of a polygon against a DSM
    ElevationProfile {
        polygon_coordinates: String,
        dsm_file_path: PathBuf,
        #[serde(default = "default_elevation_name")]
        measurement_name: String,
    },
}

impl Measurement {
    /// Area request with default CRS and name.
    pub fn area(polygon_coordinates: impl Into<String>) -> Self {
        Measurement::Area {
            polygon_coordinates: polygon_coordinates.into(),
            coordinate_system: default_crs(),
            measurement_name: default_area_name(),
        }
    }

    /// Volume request with the base elevation defaulted to the window minimum.
    pub fn volume(polygon_coordinates: impl Into<String>, dsm_file_path: impl AsRef<Path>) -> Self {
        Measurement::Volume {
            polygon_coordinates: polygon_coordinates.into(),
            dsm_file_path: dsm_file_path.as_ref().to_path_buf(),
            base_elevation: None,
            measurement_name: default_volume_name(),
        }
    }

    /// Elevation-profile request.
    pub fn elevation_profile(
        polygon_coordinates: impl Into<String>,
        dsm_file_path: impl AsRef<Path>,
    ) -> Self {
        Measurement::ElevationProfile {
            polygon_coordinates: polygon_coordinates.into(),
            dsm_file_path: dsm_file_path.as_ref().to_path_buf(),
            measurement_name: default_elevation_name(),
        }
    }

    /// Run the measurement and serialize the outcome.
    ///
    /// Failures become `{"error": ...}` payloads echoing the truncated
    /// offending input; they never escape as panics, so one bad
    /// polygon/raster pair cannot poison a batch of measurements.
    pub fn run(&self) -> String {
        let value = match self.execute() {
            Ok(value) => value,
            Err(e) => {
                log::warn!("measurement failed: {}", e);
                self.error_payload(&e.to_string())
            }
        };

        serde_json::to_string_pretty(&value)
            .unwrap_or_else(|e| format!(r#"{{"error": "serialization failed: {}"}}"#, e))
    }

    fn execute(&self) -> MeasureResult<JsonValue> {
        match self {
            Measurement::Area {
                polygon_coordinates,
                coordinate_system,
                measurement_name,
            } => {
                let ring = parse_and_validate(polygon_coordinates)?;
                log::info!("Area measurement '{}' over {} vertices", measurement_name, ring.len());

                let summary = area::polygon_area(&ring, coordinate_system);
                let result = MeasurementResult {
                    area_square_meters: summary.area_square_meters,
                    area_hectares: summary.area_square_meters / 10_000.0,
                    area_acres: summary.area_square_meters / 4_047.0,
                    perimeter_meters: summary.perimeter_meters,
                    volume_cubic_meters: None,
                    cut_volume_cubic_meters: None,
                    fill_volume_cubic_meters: None,
                    base_elevation_meters: None,
                    average_height_meters: None,
                    elevation_stats: None,
                    measurement_name: measurement_name.clone(),
                    coordinates: ring,
                    timestamp: Utc::now(),
                    metadata: MeasurementMetadata {
                        resolution_x: None,
                        resolution_y: None,
                        pixel_count: None,
                        calculation_method: summary.method,
                        coordinate_system: coordinate_system.clone(),
                        confidence_score: confidence_for(summary.method),
                        dsm_file: None,
                    },
                };

                Ok(serde_json::to_value(result)?)
            }

            Measurement::Volume {
                polygon_coordinates,
                dsm_file_path,
                base_elevation,
                measurement_name,
            } => {
                let ring = parse_and_validate(polygon_coordinates)?;
                log::info!(
                    "Volume measurement '{}' against {}",
                    measurement_name,
                    dsm_file_path.display()
                );

                let window = DsmReader::clip(dsm_file_path, &ring)?;
                let summary = area::polygon_area(&ring, &default_crs());
                let vol = volume::compute(&window, *base_elevation, summary.area_square_meters)?;

                let result = MeasurementResult {
                    area_square_meters: summary.area_square_meters,
                    area_hectares: summary.area_square_meters / 10_000.0,
                    area_acres: summary.area_square_meters / 4_047.0,
                    perimeter_meters: summary.perimeter_meters,
                    volume_cubic_meters: Some(vol.net_cubic_meters),
                    cut_volume_cubic_meters: Some(vol.cut_cubic_meters),
                    fill_volume_cubic_meters: Some(vol.fill_cubic_meters),
                    base_elevation_meters: Some(vol.base_elevation_meters),
                    average_height_meters: Some(vol.average_height_meters),
                    elevation_stats: Some(vol.stats),
                    measurement_name: measurement_name.clone(),
                    coordinates: ring,
                    timestamp: Utc::now(),
                    metadata: MeasurementMetadata {
                        resolution_x: Some(window.resolution_x),
                        resolution_y: Some(window.resolution_y),
                        pixel_count: Some(window.pixel_count()),
                        calculation_method: summary.method,
                        coordinate_system: default_crs(),
                        confidence_score: RASTER_CONFIDENCE,
                        dsm_file: Some(dsm_file_path.display().to_string()),
                    },
                };

                Ok(serde_json::to_value(result)?)
            }

            Measurement::ElevationProfile {
                polygon_coordinates,
                dsm_file_path,
                measurement_name,
            } => {
                let ring = parse_and_validate(polygon_coordinates)?;
                log::info!(
                    "Elevation profile '{}' against {}",
                    measurement_name,
                    dsm_file_path.display()
                );

                let window = DsmReader::clip(dsm_file_path, &ring)?;
                let stats = elevation::profile(&window)?;

                let report = ElevationReport {
                    measurement_name: measurement_name.clone(),
                    elevation_stats: stats,
                    coordinates: ring,
                    timestamp: Utc::now(),
                    dsm_file: dsm_file_path.display().to_string(),
                };

                Ok(serde_json::to_value(report)?)
            }
        }
    }

    fn error_payload(&self, message: &str) -> JsonValue {
        let mut payload = json!({
            "error": message,
            "polygon": truncate_input(self.polygon_input()),
        });

        if let Some(path) = self.dsm_path() {
            payload["dsm_path"] = json!(path.display().to_string());
        }

        payload
    }

    fn polygon_input(&self) -> &str {
        match self {
            Measurement::Area {
                polygon_coordinates, ..
            }
            | Measurement::Volume {
                polygon_coordinates, ..
            }
            | Measurement::ElevationProfile {
                polygon_coordinates, ..
            } => polygon_coordinates,
        }
    }

    fn dsm_path(&self) -> Option<&Path> {
        match self {
            Measurement::Area { .. } => None,
            Measurement::Volume { dsm_file_path, .. }
            | Measurement::ElevationProfile { dsm_file_path, .. } => Some(dsm_file_path),
        }
    }
}

/// Parse a polygon string and gate it through structural validation.
fn parse_and_validate(polygon_coordinates: &str) -> MeasureResult<Ring> {
    let geometry = geometry::parse_geometry(polygon_coordinates)?;
    if !geometry::validate(&geometry) {
        return Err(crate::types::MeasureError::InvalidPolygon);
    }
    geometry::outer_ring(&geometry)
}

fn confidence_for(method: CalculationMethod) -> f64 {
    match method {
        CalculationMethod::Geodesic => RASTER_CONFIDENCE,
        CalculationMethod::Simple => APPROX_CONFIDENCE,
    }
}

/// Echo at most `ERROR_INPUT_LIMIT` characters of the offending input.
fn truncate_input(raw: &str) -> String {
    if raw.chars().count() <= ERROR_INPUT_LIMIT {
        return raw.to_string();
    }
    let head: String = raw.chars().take(ERROR_INPUT_LIMIT).collect();
    format!("{}...", head)
}
