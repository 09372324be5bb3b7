//! Gap interpolation for monthly series
//!
//! Fills missing samples by linear interpolation between valid
//! neighbours, with flat extrapolation at both ends. A sample counts as
//! missing when it is absent *or* exactly zero; the upstream pipeline
//! reports months without usable observations as 0, so zero and absence
//! are indistinguishable here. A true zero measurement is therefore also
//! rewritten - accepted for compatibility with the data pipeline.

/// Round to 3 decimals, the precision reported in time series.
fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn is_valid(v: Option<f64>) -> bool {
    matches!(v, Some(x) if x != 0.0)
}

/// Fill gaps in an ordered series of value-or-missing samples.
///
/// - positions before the first valid sample take its value
/// - interior gaps are linearly interpolated between the nearest valid
///   neighbours, rounded to 3 decimals
/// - positions after the last valid sample take its value
/// - a series with no valid sample at all maps to all zeros
///
/// Valid samples are preserved exactly, so re-running the filter on an
/// already concrete, all-non-zero series is a no-op.
pub fn fill_gaps(series: &[Option<f64>]) -> Vec<f64> {
    let first_valid = series.iter().position(|v| is_valid(*v));
    let Some(first_valid) = first_valid else {
        return vec![0.0; series.len()];
    };

    let mut out = Vec::with_capacity(series.len());
    for (i, sample) in series.iter().enumerate() {
        if is_valid(*sample) {
            out.push(sample.expect("valid sample"));
            continue;
        }

        if i < first_valid {
            out.push(series[first_valid].expect("valid sample"));
            continue;
        }

        let prev = series[..i].iter().rposition(|v| is_valid(*v));
        let next = series[i + 1..]
            .iter()
            .position(|v| is_valid(*v))
            .map(|j| i + 1 + j);

        let value = match (prev, next) {
            (Some(p), Some(n)) => {
                let vp = series[p].expect("valid sample");
                let vn = series[n].expect("valid sample");
                round3(vp + (vn - vp) * (i - p) as f64 / (n - p) as f64)
            }
            (Some(p), None) => series[p].expect("valid sample"),
            (None, Some(n)) => series[n].expect("valid sample"),
            (None, None) => 0.0,
        };
        out.push(value);
    }
    out
}

/// Convenience for already-concrete series where 0.0 marks a gap.
pub fn fill_zero_gaps(series: &[f64]) -> Vec<f64> {
    let wrapped: Vec<Option<f64>> = series.iter().map(|v| Some(*v)).collect();
    fill_gaps(&wrapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_interior_gap() {
        let filled = fill_gaps(&[Some(10.0), None, None, Some(40.0)]);
        assert_eq!(filled, vec![10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn zero_counts_as_missing() {
        // Only the third sample is valid: flat fill in both directions.
        let filled = fill_gaps(&[Some(0.0), Some(0.0), Some(5.0), Some(0.0)]);
        assert_eq!(filled, vec![5.0, 5.0, 5.0, 5.0]);
    }

    #[test]
    fn idempotent_on_concrete_series() {
        let series = vec![1.5, 2.25, 3.125, 4.0];
        let once = fill_zero_gaps(&series);
        assert_eq!(once, series);
        assert_eq!(fill_zero_gaps(&once), once);
    }

    #[test]
    fn flat_fill_at_both_ends() {
        let filled = fill_gaps(&[None, None, Some(3.0), None, Some(7.0), None]);
        assert_eq!(filled, vec![3.0, 3.0, 3.0, 5.0, 7.0, 7.0]);
    }

    #[test]
    fn all_missing_becomes_zeros() {
        assert_eq!(fill_gaps(&[None, Some(0.0), None]), vec![0.0, 0.0, 0.0]);
        assert!(fill_gaps(&[]).is_empty());
    }

    #[test]
    fn interpolation_rounds_to_three_decimals() {
        let filled = fill_gaps(&[Some(1.0), None, Some(2.0)]);
        assert_eq!(filled, vec![1.0, 1.5, 2.0]);
        let filled = fill_gaps(&[Some(1.0), None, None, Some(2.0)]);
        assert_eq!(filled, vec![1.0, 1.333, 1.667, 2.0]);
    }

    #[test]
    fn valid_values_preserved_exactly() {
        let filled = fill_gaps(&[Some(0.123456), None, Some(0.654321)]);
        assert_eq!(filled[0], 0.123456);
        assert_eq!(filled[2], 0.654321);
    }
}
