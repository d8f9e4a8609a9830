use crate::types::{BoundingBox, MeasureError, MeasureResult, Ring};
use geojson::{GeoJson, Geometry, Value};

/// Parse a raw GeoJSON string into a geometry.
///
/// Malformed JSON or a non-geometry document maps to `InvalidPolygon`;
/// callers turn that into a structured error payload, never a panic.
pub fn parse_geometry(raw: &str) -> MeasureResult<Geometry> {
    let geojson: GeoJson = raw.parse().map_err(|e| {
        log::debug!("GeoJSON parse failed: {}", e);
        MeasureError::InvalidPolygon
    })?;

    match geojson {
        GeoJson::Geometry(geometry) => Ok(geometry),
        _ => Err(MeasureError::InvalidPolygon),
    }
}

/// Validate GeoJSON polygon structure.
///
/// Valid iff the geometry is a `Polygon`, has at least one ring, and every
/// ring carries at least 4 coordinate pairs. Never panics on odd input.
pub fn validate(geometry: &Geometry) -> bool {
    match &geometry.value {
        Value::Polygon(rings) => !rings.is_empty() && rings.iter().all(|ring| ring.len() >= 4),
        _ => false,
    }
}

/// Extract the outer ring of a validated polygon as `[lon, lat]` pairs.
pub fn outer_ring(geometry: &Geometry) -> MeasureResult<Ring> {
    let rings = match &geometry.value {
        Value::Polygon(rings) => rings,
        _ => return Err(MeasureError::InvalidPolygon),
    };

    let outer = rings.first().ok_or(MeasureError::InvalidPolygon)?;
    let mut ring = Ring::with_capacity(outer.len());
    for position in outer {
        if position.len() < 2 {
            return Err(MeasureError::InvalidPolygon);
        }
        ring.push([position[0], position[1]]);
    }

    Ok(ring)
}

/// Geographic envelope of a ring
pub fn envelope(ring: &Ring) -> BoundingBox {
    let mut bbox = BoundingBox {
        min_lon: f64::INFINITY,
        max_lon: f64::NEG_INFINITY,
        min_lat: f64::INFINITY,
        max_lat: f64::NEG_INFINITY,
    };

    for &[lon, lat] in ring {
        bbox.min_lon = bbox.min_lon.min(lon);
        bbox.max_lon = bbox.max_lon.max(lon);
        bbox.min_lat = bbox.min_lat.min(lat);
        bbox.max_lat = bbox.max_lat.max(lat);
    }

    bbox
}

/// Vertex-mean centroid of a ring, ignoring the closing duplicate vertex.
///
/// Only used to select a UTM zone, so vertex-mean accuracy is sufficient.
pub fn centroid(ring: &Ring) -> (f64, f64) {
    let closed = ring.len() > 1 && ring.first() == ring.last();
    let vertices = if closed { &ring[..ring.len() - 1] } else { &ring[..] };

    if vertices.is_empty() {
        return (0.0, 0.0);
    }

    let n = vertices.len() as f64;
    let (sum_lon, sum_lat) = vertices
        .iter()
        .fold((0.0, 0.0), |(lon, lat), v| (lon + v[0], lat + v[1]));

    (sum_lon / n, sum_lat / n)
}
