//! Descriptive statistics that skip missing (`NaN`) values.

/// Quantile `q` of the non-missing values, interpolating linearly between
/// the two nearest order statistics at position `q * (n - 1)`.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = pos - lo as f64;
    if frac == 0.0 {
        return Some(sorted[lo]);
    }
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Arithmetic mean of the non-missing values.
pub fn mean(values: &[f64]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), &v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn quartiles_interpolate_between_order_statistics() {
        let data = [7.0, 1.0, 3.0, 5.0];
        // positions 0.75 and 2.25 over [1, 3, 5, 7]
        assert_relative_eq!(quantile(&data, 0.25).unwrap(), 2.5);
        assert_relative_eq!(quantile(&data, 0.75).unwrap(), 5.5);
        assert_relative_eq!(quantile(&data, 0.5).unwrap(), 4.0);
    }

    #[test]
    fn quantile_ignores_missing_values() {
        let data = [f64::NAN, 2.0, f64::NAN, 4.0, 6.0];
        assert_relative_eq!(quantile(&data, 0.25).unwrap(), 3.0);
        assert_eq!(quantile(&[f64::NAN, f64::NAN], 0.5), None);
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn quantile_of_single_value_is_that_value() {
        assert_eq!(quantile(&[4.5], 0.25), Some(4.5));
        assert_eq!(quantile(&[4.5], 0.75), Some(4.5));
    }

    #[test]
    fn quantile_rejects_levels_outside_unit_interval() {
        assert_eq!(quantile(&[1.0, 2.0], 1.5), None);
    }

    #[test]
    fn mean_skips_missing_values() {
        assert_relative_eq!(mean(&[1.0, f64::NAN, 3.0]).unwrap(), 2.0);
        assert_eq!(mean(&[f64::NAN]), None);
    }
}
