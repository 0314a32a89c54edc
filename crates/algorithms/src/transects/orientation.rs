//! Baseline orientation smoothing
//!
//! Bearings are circular: 359° and 1° are 2° apart, and their average is
//! 0°, not 180°. Bearings are therefore averaged as unit vectors.

use geo::Coord;
use shorekit_core::angle::{bearing, normalize_bearing, unit_vector};

/// Circular mean of bearings in degrees.
///
/// Each bearing becomes the unit vector `(sin θ, cos θ)`; the vectors are
/// averaged and the mean bearing is `atan2(mean_x, mean_y) mod 360`.
/// NaN inputs are skipped. Returns `None` when nothing is left.
pub fn circular_mean<I>(bearings: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
    for b in bearings.into_iter().filter(|b| !b.is_nan()) {
        let (x, y) = unit_vector(b);
        sx += x;
        sy += y;
        n += 1;
    }
    if n == 0 {
        return None;
    }
    let (mx, my) = (sx / n as f64, sy / n as f64);
    Some(normalize_bearing(mx.atan2(my).to_degrees()))
}

/// Bearing between sample `i` and an adjacent sample
fn adjacent_bearing(points: &[Coord<f64>], i: usize) -> f64 {
    if i + 1 < points.len() {
        bearing(points[i], points[i + 1])
    } else {
        bearing(points[i - 1], points[i])
    }
}

/// Smoothed local tangent bearing at every sample point.
///
/// For sample `i` the window spans up to `window` samples on each side
/// (fewer at the ends). The bearings between consecutive samples inside the
/// window are combined with [`circular_mean`]. A window that collapses to a
/// single sample (`window == 0`) falls back to the bearing towards the next
/// sample, or from the previous one at the end of the sequence.
///
/// Needs at least two samples; returns an empty vector otherwise.
pub fn smoothed_bearings(points: &[Coord<f64>], window: usize) -> Vec<f64> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(window);
            let hi = (i + window).min(n - 1);
            let span = &points[lo..=hi];
            if span.len() < 2 {
                return adjacent_bearing(points, i);
            }
            circular_mean(span.windows(2).map(|w| bearing(w[0], w[1])))
                .unwrap_or_else(|| adjacent_bearing(points, i))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use shorekit_core::angle::shortest_rotation;

    fn assert_bearing_eq(actual: f64, expected: f64) {
        assert!(
            shortest_rotation(actual, expected).abs() < 1e-9,
            "bearing {actual} != {expected}"
        );
    }

    #[test]
    fn test_circular_mean_across_north() {
        let m = circular_mean([359.0, 1.0]).unwrap();
        assert_bearing_eq(m, 0.0);
        assert!(m < 360.0);
    }

    #[test]
    fn test_circular_mean_plain_values() {
        assert_abs_diff_eq!(circular_mean([80.0, 100.0]).unwrap(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(circular_mean([270.0]).unwrap(), 270.0, epsilon = 1e-9);
        assert!(circular_mean(Vec::<f64>::new()).is_none());
        assert!(circular_mean([f64::NAN]).is_none());
    }

    /// Samples zig-zagging northwards: consecutive bearings alternate 359°/1°.
    fn north_zigzag(n: usize) -> Vec<Coord<f64>> {
        let dx = 1.0_f64.to_radians().tan() * 10.0;
        (0..n)
            .map(|i| Coord {
                x: if i % 2 == 0 { 0.0 } else { dx },
                y: i as f64 * 10.0,
            })
            .collect()
    }

    #[test]
    fn test_smoothing_north_wrap_all_windows() {
        let points = north_zigzag(12);
        for window in 1..=5 {
            for (i, b) in smoothed_bearings(&points, window).into_iter().enumerate() {
                // Even-sized windows cancel exactly; odd ones stay within 1°
                let tol = 1.0 + 1e-9;
                assert!(
                    shortest_rotation(b, 0.0).abs() <= tol,
                    "window {window}, sample {i}: {b}"
                );
                assert!(!(90.0..=270.0).contains(&b), "window {window}: {b} points south");
            }
        }
    }

    #[test]
    fn test_straight_line_bearings() {
        let points: Vec<_> = (0..6).map(|i| Coord { x: i as f64 * 5.0, y: 0.0 }).collect();
        for b in smoothed_bearings(&points, 5) {
            assert_abs_diff_eq!(b, 90.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_window_zero_falls_back_to_adjacent_pair() {
        let points = vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
        ];
        let b = smoothed_bearings(&points, 0);
        assert_abs_diff_eq!(b[0], 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b[1], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b[2], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_smoothing_rounds_a_corner() {
        let mut points: Vec<_> = (0..5).map(|i| Coord { x: i as f64, y: 0.0 }).collect();
        points.extend((1..5).map(|i| Coord { x: 4.0, y: i as f64 }));
        let b = smoothed_bearings(&points, 2);
        assert_abs_diff_eq!(b[0], 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b[8], 0.0, epsilon = 1e-9);
        // At the corner the two legs average to north-east
        assert_abs_diff_eq!(b[4], 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_single_sample_gives_nothing() {
        assert!(smoothed_bearings(&[Coord { x: 0.0, y: 0.0 }], 5).is_empty());
    }
}
