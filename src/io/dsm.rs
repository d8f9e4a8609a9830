use crate::core::geometry;
use crate::types::{ElevationWindow, GeoTransform, MeasureError, MeasureResult, Ring};
use gdal::Dataset;
use ndarray::Array2;
use std::path::Path;

/// Digital Surface Model reader
pub struct DsmReader;

impl DsmReader {
    /// Clip the elevation band of a DSM to a polygon's envelope.
    ///
    /// Opens the raster read-only, maps the envelope into pixel space via
    /// the affine geotransform, clamps to the raster bounds, reads the
    /// window, and drops no-data pixels. The dataset handle lives only for
    /// the duration of this call and is released on every exit path.
    pub fn clip<P: AsRef<Path>>(dsm_path: P, ring: &Ring) -> MeasureResult<ElevationWindow> {
        let path = dsm_path.as_ref();
        log::info!("Clipping DSM: {}", path.display());

        if !path.exists() {
            return Err(MeasureError::RasterNotFound(path.display().to_string()));
        }

        let dataset = Dataset::open(path)
            .map_err(|_| MeasureError::RasterNotFound(path.display().to_string()))?;

        let geo = GeoTransform::from_gdal(dataset.geo_transform()?);
        let (width, height) = dataset.raster_size();
        log::debug!("DSM size: {}x{}, geotransform: {:?}", width, height, geo);

        let bbox = geometry::envelope(ring);

        // Envelope corners in pixel space, sign-aware for north-up rasters
        // (negative pixel_height).
        let ulx = ((bbox.min_lon - geo.origin_x) / geo.pixel_width).floor() as isize;
        let uly = ((bbox.max_lat - geo.origin_y) / geo.pixel_height).floor() as isize;
        let lrx = ((bbox.max_lon - geo.origin_x) / geo.pixel_width).floor() as isize;
        let lry = ((bbox.min_lat - geo.origin_y) / geo.pixel_height).floor() as isize;

        let ulx = ulx.max(0);
        let uly = uly.max(0);
        let lrx = lrx.min(width as isize);
        let lry = lry.min(height as isize);

        let cols = lrx - ulx;
        let rows = lry - uly;
        if cols <= 0 || rows <= 0 {
            return Err(MeasureError::NoIntersection);
        }
        log::debug!(
            "pixel window: ({}, {}) size {}x{}",
            ulx,
            uly,
            cols,
            rows
        );

        let band = dataset.rasterband(1)?;
        let nodata = band.no_data_value();

        let buffer = band.read_as::<f32>(
            (ulx, uly),
            (cols as usize, rows as usize),
            (cols as usize, rows as usize),
            None,
        )?;
        let grid = Array2::from_shape_vec((rows as usize, cols as usize), buffer.data)
            .map_err(|e| MeasureError::Processing(format!("window reshape failed: {}", e)))?;

        let samples = filter_nodata(&grid, nodata);
        if samples.is_empty() {
            return Err(MeasureError::EmptyWindow);
        }
        log::debug!(
            "{} of {} pixels valid after no-data filtering",
            samples.len(),
            grid.len()
        );

        Ok(ElevationWindow {
            samples,
            resolution_x: geo.pixel_width.abs(),
            resolution_y: geo.pixel_height.abs(),
        })
    }
}

/// Drop no-data and non-finite pixels, widening the rest to f64.
fn filter_nodata(grid: &Array2<f32>, nodata: Option<f64>) -> Vec<f64> {
    let sentinel = nodata.map(|v| v as f32);
    grid.iter()
        .filter(|&&v| v.is_finite() && Some(v) != sentinel)
        .map(|&v| v as f64)
        .collect()
}
