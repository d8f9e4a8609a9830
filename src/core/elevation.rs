use crate::types::{ElevationStats, ElevationWindow, MeasureError, MeasureResult, ProfileStats};
use num_traits::ToPrimitive;

/// Aggregate statistics over a set of elevation samples.
///
/// Returns `None` for an empty input. Standard deviation is the population
/// form; median averages the two middle samples for even counts.
pub fn elevation_stats<T: ToPrimitive + Copy>(samples: &[T]) -> Option<ElevationStats> {
    if samples.is_empty() {
        return None;
    }

    let mut values: Vec<f64> = samples
        .iter()
        .filter_map(|s| s.to_f64())
        .filter(|v| v.is_finite())
        .collect();
    if values.is_empty() {
        return None;
    }

    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = values.len();
    let min = values[0];
    let max = values[n - 1];
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
    let median = if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    };

    Some(ElevationStats {
        min,
        max,
        mean,
        std: variance.sqrt(),
        median,
    })
}

/// Elevation profile of a clipped window: plain statistics plus the
/// min-to-max range, no volume semantics.
pub fn profile(window: &ElevationWindow) -> MeasureResult<ProfileStats> {
    let stats = elevation_stats(&window.samples).ok_or(MeasureError::EmptyWindow)?;

    Ok(ProfileStats {
        stats,
        range: stats.max - stats.min,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stats_basic() {
        let stats = elevation_stats(&[2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_relative_eq!(stats.min, 2.0);
        assert_relative_eq!(stats.max, 9.0);
        assert_relative_eq!(stats.mean, 5.0);
        assert_relative_eq!(stats.std, 2.0);
        assert_relative_eq!(stats.median, 4.5);
    }

    #[test]
    fn test_stats_odd_count_median() {
        let stats = elevation_stats(&[3.0_f32, 1.0, 2.0]).unwrap();
        assert_relative_eq!(stats.median, 2.0);
    }

    #[test]
    fn test_stats_empty_is_none() {
        assert!(elevation_stats::<f64>(&[]).is_none());
    }

    #[test]
    fn test_profile_range() {
        let window = ElevationWindow {
            samples: vec![98.5, 105.2, 102.5],
            resolution_x: 0.1,
            resolution_y: 0.1,
        };
        let profile = profile(&window).unwrap();
        assert_relative_eq!(profile.range, 105.2 - 98.5, max_relative = 1e-12);
    }
}
