mod common;

use approx::assert_relative_eq;
use serde_json::Value;
use tempfile::TempDir;
use terrametrics::Measurement;

fn run_to_json(request: &Measurement) -> Value {
    serde_json::from_str(&request.run()).expect("run() output is valid JSON")
}

#[test]
fn test_profile_statistics() {
    common::init_logging();
    let dir = TempDir::new().unwrap();
    let dsm = dir.path().join("sloped.tif");
    // 102 on the west half, 98 on the east
    let data: Vec<f32> = (0..100)
        .map(|i| if i % 10 < 5 { 102.0 } else { 98.0 })
        .collect();
    common::write_dsm(&dsm, (0.0, 10.0), (1.0, 1.0), (10, 10), data, Some(common::NODATA));

    let result = run_to_json(&Measurement::elevation_profile(common::inner_square(), &dsm));

    assert!(result.get("error").is_none(), "unexpected error: {}", result);
    assert_eq!(result["measurement_name"], "Elevation Analysis");

    let stats = &result["elevation_stats"];
    assert_relative_eq!(stats["min"].as_f64().unwrap(), 98.0);
    assert_relative_eq!(stats["max"].as_f64().unwrap(), 102.0);
    assert_relative_eq!(stats["mean"].as_f64().unwrap(), 101.0);
    assert_relative_eq!(stats["median"].as_f64().unwrap(), 102.0);
    assert_relative_eq!(stats["std"].as_f64().unwrap(), 3.0_f64.sqrt(), max_relative = 1e-9);
    assert_relative_eq!(stats["range"].as_f64().unwrap(), 4.0);
}

#[test]
fn test_profile_reports_dsm_path() {
    let dir = TempDir::new().unwrap();
    let dsm = dir.path().join("uniform.tif");
    common::write_uniform_dsm(&dsm, 100.0);

    let result = run_to_json(&Measurement::elevation_profile(common::inner_square(), &dsm));

    assert_eq!(
        result["dsm_file"].as_str().unwrap(),
        dsm.display().to_string()
    );
}

#[test]
fn test_profile_propagates_clip_failures() {
    let dir = TempDir::new().unwrap();
    let dsm = dir.path().join("uniform.tif");
    common::write_uniform_dsm(&dsm, 100.0);

    let outside =
        r#"{"type":"Polygon","coordinates":[[[20,20],[21,20],[21,21],[20,21],[20,20]]]}"#;
    let result = run_to_json(&Measurement::elevation_profile(outside.to_string(), &dsm));

    assert_eq!(result["error"], "polygon does not intersect DSM");
}

#[test]
fn test_profile_invalid_polygon() {
    let dir = TempDir::new().unwrap();
    let dsm = dir.path().join("uniform.tif");
    common::write_uniform_dsm(&dsm, 100.0);

    let result = run_to_json(&Measurement::elevation_profile("{broken".to_string(), &dsm));

    assert_eq!(result["error"], "Invalid GeoJSON polygon format");
}
