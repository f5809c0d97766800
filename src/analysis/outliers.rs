use super::stats::quantile;

// ---------------------------------------------------------------------------
// Tukey fences
// ---------------------------------------------------------------------------

/// Quartiles of a window and the rejection thresholds derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fences {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl Fences {
    /// Fences at `Q1 - multiplier * IQR` and `Q3 + multiplier * IQR`.
    /// `None` when `values` holds no numeric entry.
    pub fn from_values(values: &[f64], multiplier: f64) -> Option<Self> {
        let q1 = quantile(values, 0.25)?;
        let q3 = quantile(values, 0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    /// A value lying on a fence is kept.
    pub fn is_outlier(&self, value: f64) -> bool {
        value > self.upper || value < self.lower
    }
}

/// Copy of `values` with every outlier replaced by `NaN`.
///
/// Both tests read the original column, so a value is dropped when it
/// fails either one.
pub fn suppress_outliers(values: &[f64], fences: &Fences) -> Vec<f64> {
    values
        .iter()
        .map(|&v| if fences.is_outlier(v) { f64::NAN } else { v })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fences_scale_with_multiplier() {
        let data = [1.0, 3.0, 5.0, 7.0];
        let fences = Fences::from_values(&data, 2.0).unwrap();
        assert_relative_eq!(fences.iqr, 3.0);
        assert_relative_eq!(fences.lower, 2.5 - 6.0);
        assert_relative_eq!(fences.upper, 5.5 + 6.0);
    }

    #[test]
    fn column_inside_fences_is_unchanged() {
        let data = [4.0, 5.0, 6.0, 5.5, 4.5, 5.0];
        let fences = Fences::from_values(&data, 1.5).unwrap();
        assert_eq!(suppress_outliers(&data, &fences), data.to_vec());
    }

    #[test]
    fn constant_plateau_keeps_values_on_the_fence() {
        let mut data = vec![10.0; 50];
        data[20] = 1000.0;
        data[30] = -1000.0;
        let fences = Fences::from_values(&data, 1.5).unwrap();
        assert_eq!(fences.iqr, 0.0);

        let cleaned = suppress_outliers(&data, &fences);
        assert!(cleaned[20].is_nan());
        assert!(cleaned[30].is_nan());
        assert_eq!(cleaned.iter().filter(|v| v.is_nan()).count(), 2);
        assert_eq!(cleaned[0], 10.0);
    }

    #[test]
    fn high_and_low_outliers_are_both_dropped() {
        let data = [10.0, 11.0, 10.5, 9.5, 10.2, 55.0, 9.8, -40.0, 10.1];
        let fences = Fences::from_values(&data, 3.0).unwrap();
        let cleaned = suppress_outliers(&data, &fences);
        assert!(cleaned[5].is_nan());
        assert!(cleaned[7].is_nan());
        assert_eq!(cleaned[0], 10.0);
        assert_eq!(cleaned[8], 10.1);
    }

    #[test]
    fn missing_values_stay_missing() {
        let data = [1.0, f64::NAN, 2.0, 3.0];
        let fences = Fences::from_values(&data, 1.5).unwrap();
        let cleaned = suppress_outliers(&data, &fences);
        assert!(cleaned[1].is_nan());
    }

    #[test]
    fn all_missing_has_no_fences() {
        assert_eq!(Fences::from_values(&[f64::NAN; 3], 1.5), None);
    }
}
