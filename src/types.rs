use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One `[longitude, latitude]` vertex of a polygon ring.
pub type Coordinate = [f64; 2];

/// A polygon ring: ordered vertices, first and last expected to coincide.
pub type Ring = Vec<Coordinate>;

/// Geographic bounding box of a polygon ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

/// Affine geotransform mapping pixel (col, row) to geographic (x, y).
///
/// For north-up rasters the rotation terms are zero and `pixel_height`
/// is negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub pixel_width: f64,
    pub row_rotation: f64,
    pub origin_y: f64,
    pub col_rotation: f64,
    pub pixel_height: f64,
}

impl GeoTransform {
    /// Build from a GDAL-style coefficient array
    /// `[origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]`.
    pub fn from_gdal(coeffs: [f64; 6]) -> Self {
        Self {
            origin_x: coeffs[0],
            pixel_width: coeffs[1],
            row_rotation: coeffs[2],
            origin_y: coeffs[3],
            col_rotation: coeffs[4],
            pixel_height: coeffs[5],
        }
    }

    /// Ground area covered by one pixel, in the raster's native linear unit.
    pub fn pixel_area(&self) -> f64 {
        (self.pixel_width * self.pixel_height).abs()
    }
}

/// Valid elevation samples clipped from a DSM under a polygon's envelope.
///
/// No-data pixels have already been removed; `samples` is never empty for a
/// window returned by a successful clip.
#[derive(Debug, Clone)]
pub struct ElevationWindow {
    /// Valid elevation samples, meters
    pub samples: Vec<f64>,
    /// Pixel width in the raster's native unit
    pub resolution_x: f64,
    /// Pixel height (absolute value) in the raster's native unit
    pub resolution_y: f64,
}

impl ElevationWindow {
    pub fn pixel_area(&self) -> f64 {
        (self.resolution_x * self.resolution_y).abs()
    }

    pub fn pixel_count(&self) -> usize {
        self.samples.len()
    }
}

/// How the area/perimeter figures were obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    /// UTM reprojection and planar math on projected coordinates
    Geodesic,
    /// Fixed degrees-to-meters scaling of raw coordinates; markedly less
    /// accurate away from the equator
    Simple,
}

/// Aggregate statistics over an elevation window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
    pub median: f64,
}

/// Calculation provenance attached to every measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_count: Option<usize>,
    pub calculation_method: CalculationMethod,
    pub coordinate_system: String,
    pub confidence_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dsm_file: Option<String>,
}

/// Result record returned to the caller for area and volume measurements.
///
/// Volume-only fields are omitted from the JSON form for area-only requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    pub area_square_meters: f64,
    pub area_hectares: f64,
    pub area_acres: f64,
    pub perimeter_meters: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_cubic_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cut_volume_cubic_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_volume_cubic_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_elevation_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_height_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_stats: Option<ElevationStats>,
    pub measurement_name: String,
    pub coordinates: Ring,
    pub timestamp: DateTime<Utc>,
    pub metadata: MeasurementMetadata,
}

/// Elevation statistics extended with the min-to-max spread
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileStats {
    #[serde(flatten)]
    pub stats: ElevationStats,
    pub range: f64,
}

/// Result record for elevation-only analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationReport {
    pub measurement_name: String,
    pub elevation_stats: ProfileStats,
    pub coordinates: Ring,
    pub timestamp: DateTime<Utc>,
    pub dsm_file: String,
}

/// Error types for spatial measurement
#[derive(Debug, thiserror::Error)]
pub enum MeasureError {
    #[error("Invalid GeoJSON polygon format")]
    InvalidPolygon,

    #[error("DSM file not found: {0}")]
    RasterNotFound(String),

    #[error("polygon does not intersect DSM")]
    NoIntersection,

    #[error("no valid elevation data found within polygon")]
    EmptyWindow,

    #[error("projection backend unavailable: {0}")]
    Projection(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for measurement operations
pub type MeasureResult<T> = Result<T, MeasureError>;
