//! Forecast confidence heuristic

/// Bounds of the coefficient-of-variation quality score.
const QUALITY_MIN: f64 = 50.0;
const QUALITY_MAX: f64 = 95.0;

/// Sample count at which the size factor saturates.
const FULL_SAMPLE: f64 = 20.0;

/// Weighted blend of data-quality and sample-size scores, rounded to a
/// whole percentage.
///
/// Quality is `100 - CV%` clamped to `[50, 95]` (a zero or negative mean
/// scores the minimum); the size factor is `min(20, n)/20 * 100`. The
/// blend is 70% quality, 30% size.
pub fn confidence_score(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return QUALITY_MIN * 0.7;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
    let std_dev = variance.sqrt();

    let quality = if mean > 0.0 {
        (100.0 - std_dev / mean * 100.0).clamp(QUALITY_MIN, QUALITY_MAX)
    } else {
        QUALITY_MIN
    };
    let sample_factor = (n as f64).min(FULL_SAMPLE) / FULL_SAMPLE * 100.0;

    (quality * 0.7 + sample_factor * 0.3).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_consistent_series_scores_high() {
        let values = vec![500.0; 20];
        // Zero variance: quality 95, full sample factor 100.
        assert_eq!(confidence_score(&values), (95.0f64 * 0.7 + 100.0 * 0.3).round());
    }

    #[test]
    fn short_series_penalized_by_sample_factor() {
        let values = vec![500.0; 5];
        let expected = (95.0f64 * 0.7 + 25.0 * 0.3).round();
        assert_eq!(confidence_score(&values), expected);
    }

    #[test]
    fn noisy_series_clamped_to_quality_floor() {
        // CV far above 50%: quality clamps at 50.
        let values = vec![10.0, 1000.0, 5.0, 900.0, 2.0, 1100.0];
        let score = confidence_score(&values);
        assert_eq!(score, (50.0f64 * 0.7 + 30.0 * 0.3).round());
    }

    #[test]
    fn empty_and_zero_mean_default_to_floor_quality() {
        assert_eq!(confidence_score(&[]), 35.0);
        let score = confidence_score(&[0.0, 0.0, 0.0]);
        assert_eq!(score, (50.0f64 * 0.7 + 15.0 * 0.3).round());
    }
}
