//! Python bindings for the measurement operations.
//!
//! Each function mirrors one of the original agent tools and returns a JSON
//! string: a result record on success, `{"error": ...}` on failure.

use crate::measure::Measurement;
use pyo3::prelude::*;
use std::path::PathBuf;

#[pyfunction]
#[pyo3(signature = (polygon_coordinates, coordinate_system = None, measurement_name = None))]
fn calculate_polygon_area(
    polygon_coordinates: String,
    coordinate_system: Option<String>,
    measurement_name: Option<String>,
) -> String {
    let mut request = Measurement::area(polygon_coordinates);
    if let Measurement::Area {
        coordinate_system: crs,
        measurement_name: name,
        ..
    } = &mut request
    {
        if let Some(value) = coordinate_system {
            *crs = value;
        }
        if let Some(value) = measurement_name {
            *name = value;
        }
    }
    request.run()
}

#[pyfunction]
#[pyo3(signature = (polygon_coordinates, dsm_file_path, base_elevation = None, measurement_name = None))]
fn calculate_volume_from_polygon(
    polygon_coordinates: String,
    dsm_file_path: PathBuf,
    base_elevation: Option<f64>,
    measurement_name: Option<String>,
) -> String {
    let mut request = Measurement::volume(polygon_coordinates, dsm_file_path);
    if let Measurement::Volume {
        base_elevation: base,
        measurement_name: name,
        ..
    } = &mut request
    {
        *base = base_elevation;
        if let Some(value) = measurement_name {
            *name = value;
        }
    }
    request.run()
}

#[pyfunction]
#[pyo3(signature = (polygon_coordinates, dsm_file_path, measurement_name = None))]
fn analyze_elevation_profile(
    polygon_coordinates: String,
    dsm_file_path: PathBuf,
    measurement_name: Option<String>,
) -> String {
    let mut request = Measurement::elevation_profile(polygon_coordinates, dsm_file_path);
    if let Measurement::ElevationProfile {
        measurement_name: name,
        ..
    } = &mut request
    {
        if let Some(value) = measurement_name {
            *name = value;
        }
    }
    request.run()
}

/// Python module definition
#[pymodule]
fn _core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(calculate_polygon_area, m)?)?;
    m.add_function(wrap_pyfunction!(calculate_volume_from_polygon, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_elevation_profile, m)?)?;
    Ok(())
}
