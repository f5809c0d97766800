/// Fill `NaN` gaps in `values` by linear interpolation over `positions`.
///
/// Gaps between two known values are interpolated on the position axis.
/// Missing values before the first known value stay missing; missing values
/// after the last known value repeat it. `positions` must be non-decreasing
/// and the same length as `values`.
pub fn interpolate_linear(positions: &[f64], values: &[f64]) -> Vec<f64> {
    debug_assert_eq!(positions.len(), values.len());
    let mut out = values.to_vec();
    let mut prev: Option<usize> = None;

    for i in 0..values.len() {
        if values[i].is_nan() {
            continue;
        }
        if let Some(p) = prev {
            if i > p + 1 {
                let (x0, y0) = (positions[p], values[p]);
                let (x1, y1) = (positions[i], values[i]);
                let span = x1 - x0;
                for j in p + 1..i {
                    out[j] = if span > 0.0 {
                        y0 + (y1 - y0) * (positions[j] - x0) / span
                    } else {
                        y0
                    };
                }
            }
        }
        prev = Some(i);
    }

    if let Some(last) = prev {
        for v in &mut out[last + 1..] {
            *v = values[last];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn index_axis(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn isolated_gaps_are_filled_and_known_points_kept() {
        let values = [1.0, f64::NAN, 3.0, 4.0, f64::NAN, 8.0];
        let filled = interpolate_linear(&index_axis(6), &values);

        assert!(filled.iter().all(|v| !v.is_nan()));
        assert_eq!(filled[0], 1.0);
        assert_eq!(filled[2], 3.0);
        assert_eq!(filled[3], 4.0);
        assert_eq!(filled[5], 8.0);
        assert_relative_eq!(filled[1], 2.0);
        assert_relative_eq!(filled[4], 6.0);
    }

    #[test]
    fn longer_gap_is_a_straight_line() {
        let values = [0.0, f64::NAN, f64::NAN, f64::NAN, 8.0];
        let filled = interpolate_linear(&index_axis(5), &values);
        assert_relative_eq!(filled[1], 2.0);
        assert_relative_eq!(filled[2], 4.0);
        assert_relative_eq!(filled[3], 6.0);
    }

    #[test]
    fn uneven_positions_weight_the_interpolation() {
        let positions = [0.0, 1.0, 4.0];
        let values = [0.0, f64::NAN, 8.0];
        let filled = interpolate_linear(&positions, &values);
        assert_relative_eq!(filled[1], 2.0);
    }

    #[test]
    fn leading_gap_stays_missing_and_trailing_gap_repeats_last() {
        let values = [f64::NAN, 2.0, 4.0, f64::NAN, f64::NAN];
        let filled = interpolate_linear(&index_axis(5), &values);
        assert!(filled[0].is_nan());
        assert_eq!(&filled[1..], &[2.0, 4.0, 4.0, 4.0]);
    }

    #[test]
    fn all_missing_is_returned_unchanged() {
        let filled = interpolate_linear(&index_axis(3), &[f64::NAN; 3]);
        assert!(filled.iter().all(|v| v.is_nan()));
    }
}
