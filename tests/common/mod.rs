#![allow(dead_code)]

use gdal::raster::Buffer;
use gdal::DriverManager;
use std::path::Path;

pub const NODATA: f64 = -9999.0;

/// Write a single-band north-up GeoTIFF for test scenarios.
///
/// `pixel_size` is given positive; the geotransform stores the negative
/// row direction as GDAL expects.
pub fn write_dsm(
    path: &Path,
    origin: (f64, f64),
    pixel_size: (f64, f64),
    size: (usize, usize),
    data: Vec<f32>,
    nodata: Option<f64>,
) {
    assert_eq!(data.len(), size.0 * size.1);

    let driver = DriverManager::get_driver_by_name("GTiff").expect("GTiff driver available");
    let mut dataset = driver
        .create_with_band_type::<f32, _>(path, size.0 as isize, size.1 as isize, 1)
        .expect("create test raster");
    dataset
        .set_geo_transform(&[origin.0, pixel_size.0, 0.0, origin.1, 0.0, -pixel_size.1])
        .expect("set geotransform");

    let mut band = dataset.rasterband(1).expect("band 1");
    if let Some(value) = nodata {
        band.set_no_data_value(Some(value)).expect("set nodata");
    }
    band.write((0, 0), size, &Buffer::new(size, data))
        .expect("write elevation band");
}

/// 10x10 raster spanning x 0..10, y 0..10 with 1-unit pixels.
pub fn write_uniform_dsm(path: &Path, value: f32) {
    write_dsm(
        path,
        (0.0, 10.0),
        (1.0, 1.0),
        (10, 10),
        vec![value; 100],
        Some(NODATA),
    );
}

/// A square polygon covering x 2..6, y 2..6 of the 10x10 test raster.
pub fn inner_square() -> String {
    r#"{"type":"Polygon","coordinates":[[[2,2],[6,2],[6,6],[2,6],[2,2]]]}"#.to_string()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
