use crate::core::elevation;
use crate::types::{ElevationStats, ElevationWindow, MeasureError, MeasureResult};

/// Cut/fill decomposition of a clipped elevation window.
///
/// Convention: fill is material above the base elevation, cut is material
/// below it, both non-negative; net = fill - cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeSummary {
    pub net_cubic_meters: f64,
    pub cut_cubic_meters: f64,
    pub fill_cubic_meters: f64,
    pub base_elevation_meters: f64,
    pub average_height_meters: f64,
    pub stats: ElevationStats,
}

/// Compute cut, fill, and net volume over a clipped window.
///
/// When `base_elevation` is not supplied it defaults to the window minimum,
/// so cut volume is zero by construction. `area_square_meters` only feeds
/// the average-height figure; zero area yields zero average height.
pub fn compute(
    window: &ElevationWindow,
    base_elevation: Option<f64>,
    area_square_meters: f64,
) -> MeasureResult<VolumeSummary> {
    let stats = elevation::elevation_stats(&window.samples).ok_or(MeasureError::EmptyWindow)?;
    let base = base_elevation.unwrap_or(stats.min);
    let pixel_area = window.pixel_area();

    let mut cut = 0.0;
    let mut fill = 0.0;
    for &sample in &window.samples {
        let height_diff = sample - base;
        if height_diff > 0.0 {
            fill += height_diff;
        } else {
            cut += -height_diff;
        }
    }
    cut *= pixel_area;
    fill *= pixel_area;
    let net = fill - cut;

    log::debug!(
        "volume over {} samples: fill={:.3} cut={:.3} base={:.3}",
        window.samples.len(),
        fill,
        cut,
        base
    );

    let average_height = if area_square_meters > 0.0 {
        net / area_square_meters
    } else {
        0.0
    };

    Ok(VolumeSummary {
        net_cubic_meters: net,
        cut_cubic_meters: cut,
        fill_cubic_meters: fill,
        base_elevation_meters: base,
        average_height_meters: average_height,
        stats,
    })
}
