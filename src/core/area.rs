use crate::core::geometry;
use crate::types::{CalculationMethod, MeasureError, MeasureResult, Ring};
use once_cell::sync::Lazy;
use proj4rs::proj::Proj;

/// Rough meters-per-degree factor for the legacy fallback path. Reasonable
/// near the equator, increasingly wrong toward the poles.
pub const DEGREE_TO_METERS: f64 = 111_000.0;

const WGS84_SPEC: &str = "+proj=longlat +ellps=WGS84 +datum=WGS84 +no_defs";

/// Whether the projection backend can be used at all, resolved once.
static GEODESIC_AVAILABLE: Lazy<bool> = Lazy::new(|| match Proj::from_proj_string(WGS84_SPEC) {
    Ok(_) => true,
    Err(e) => {
        log::warn!(
            "projection backend unavailable, falling back to simple area math: {}",
            e
        );
        false
    }
});

/// Area and perimeter of a polygon ring, with the method that produced them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaSummary {
    pub area_square_meters: f64,
    pub perimeter_meters: f64,
    pub method: CalculationMethod,
}

/// Compute area and perimeter for a polygon ring in `source_crs`.
///
/// Geographic input is reprojected into the UTM zone of the ring centroid
/// before planar math; projected input is measured directly. If the
/// projection backend is unavailable or the transform fails, the simple
/// degrees-to-meters approximation is used and flagged in the summary.
pub fn polygon_area(ring: &Ring, source_crs: &str) -> AreaSummary {
    if !is_geographic(source_crs) {
        // Already projected, measure in native units
        let points: Vec<(f64, f64)> = ring.iter().map(|v| (v[0], v[1])).collect();
        return AreaSummary {
            area_square_meters: shoelace(&points),
            perimeter_meters: perimeter(&points),
            method: CalculationMethod::Geodesic,
        };
    }

    if *GEODESIC_AVAILABLE {
        match project_ring(ring) {
            Ok(projected) => {
                return AreaSummary {
                    area_square_meters: shoelace(&projected),
                    perimeter_meters: perimeter(&projected),
                    method: CalculationMethod::Geodesic,
                };
            }
            Err(e) => {
                log::warn!("UTM projection failed, using simple approximation: {}", e);
            }
        }
    }

    AreaSummary {
        area_square_meters: simple_area(ring),
        perimeter_meters: simple_perimeter(ring),
        method: CalculationMethod::Simple,
    }
}

/// Legacy fallback: shoelace on raw degrees scaled by a fixed factor.
pub fn simple_area(ring: &Ring) -> f64 {
    let points: Vec<(f64, f64)> = ring.iter().map(|v| (v[0], v[1])).collect();
    shoelace(&points) * DEGREE_TO_METERS * DEGREE_TO_METERS
}

/// Legacy fallback perimeter: Euclidean edge lengths in degrees, scaled.
pub fn simple_perimeter(ring: &Ring) -> f64 {
    let points: Vec<(f64, f64)> = ring.iter().map(|v| (v[0], v[1])).collect();
    perimeter(&points) * DEGREE_TO_METERS
}

/// Reproject a WGS84 ring into the UTM zone of its centroid.
fn project_ring(ring: &Ring) -> MeasureResult<Vec<(f64, f64)>> {
    let (lon, lat) = geometry::centroid(ring);
    let zone = utm_zone(lon);
    let south = if lat < 0.0 { " +south" } else { "" };
    let utm_spec = format!("+proj=utm +zone={}{} +datum=WGS84 +units=m +no_defs", zone, south);
    log::debug!("projecting ring into UTM zone {} ({})", zone, utm_spec);

    let wgs84 = Proj::from_proj_string(WGS84_SPEC)
        .map_err(|e| MeasureError::Projection(e.to_string()))?;
    let utm = Proj::from_proj_string(&utm_spec)
        .map_err(|e| MeasureError::Projection(e.to_string()))?;

    let mut projected = Vec::with_capacity(ring.len());
    for &[lon, lat] in ring {
        let mut point = (lon.to_radians(), lat.to_radians());
        proj4rs::transform::transform(&wgs84, &utm, &mut point)
            .map_err(|e| MeasureError::Projection(e.to_string()))?;
        projected.push(point);
    }

    Ok(projected)
}

/// UTM zone number for a longitude, clamped to the valid 1..=60 range.
fn utm_zone(lon: f64) -> i32 {
    let zone = ((lon + 180.0) / 6.0).floor() as i32 + 1;
    zone.clamp(1, 60)
}

/// Shoelace formula; winding-independent (absolute value).
fn shoelace(points: &[(f64, f64)]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut acc = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        acc += points[i].0 * points[j].1;
        acc -= points[j].0 * points[i].1;
    }

    (acc * 0.5).abs()
}

/// Sum of Euclidean edge lengths along the ring as given.
fn perimeter(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|pair| {
            let dx = pair[1].0 - pair[0].0;
            let dy = pair[1].1 - pair[0].1;
            (dx * dx + dy * dy).sqrt()
        })
        .sum()
}

/// Whether a CRS string names geographic (lon/lat) coordinates.
fn is_geographic(crs: &str) -> bool {
    let crs = crs.trim();
    crs.eq_ignore_ascii_case("EPSG:4326") || crs.eq_ignore_ascii_case("WGS84")
}
