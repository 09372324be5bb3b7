//! Rainfall projections from multi-year history
//!
//! Short-horizon (four-week) outlooks combine a recency-weighted average
//! of yearly totals, trend-direction multipliers and per-week Gaussian
//! noise scaled to the series' spread. The noise source is an explicit
//! seeded RNG so forecasts are reproducible.

use agrolens_core::YearlyValue;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use tracing::debug;

use super::confidence::confidence_score;
use super::trend::{fit_trend, Trend, TrendModel, MIN_POINTS_FOR_MEAN};

/// Default annual-total projection when history is too thin.
pub const DEFAULT_ANNUAL_PROJECTION: f64 = 600.0;

/// Default same-month projection when history is too thin.
pub const DEFAULT_MONTHLY_PROJECTION: f64 = 50.0;

/// Fallback weekly values reported when no usable history exists.
const DEFAULT_WEEKS: [f64; 4] = [50.0, 40.0, 35.0, 45.0];

/// Four-week rainfall outlook with yearly projections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThirtyDayOutlook {
    pub week1: f64,
    pub week2: f64,
    pub week3: f64,
    pub week4: f64,
    pub total: f64,
    /// Whole-percent confidence score.
    pub confidence: f64,
    pub trend: Trend,
    /// Mean of the yearly history (0 with no usable history).
    pub average: f64,
    pub year1_prediction: f64,
    pub year2_prediction: f64,
}

/// Same-month projection for the next two years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyProjection {
    pub year1: f64,
    pub year2: f64,
    pub trend: Trend,
}

/// Seeded rainfall predictor.
pub struct RainfallPredictor {
    rng: StdRng,
}

impl RainfallPredictor {
    /// Deterministic predictor for the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Predictor seeded from OS entropy (interactive use).
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Four-week outlook from yearly rainfall totals.
    pub fn thirty_day_outlook(&mut self, history: &[YearlyValue]) -> ThirtyDayOutlook {
        if history.len() < MIN_POINTS_FOR_MEAN {
            debug!(points = history.len(), "insufficient history, using default outlook");
            return ThirtyDayOutlook {
                week1: DEFAULT_WEEKS[0],
                week2: DEFAULT_WEEKS[1],
                week3: DEFAULT_WEEKS[2],
                week4: DEFAULT_WEEKS[3],
                total: DEFAULT_WEEKS.iter().sum(),
                confidence: 50.0,
                trend: Trend::Normal,
                average: 0.0,
                year1_prediction: DEFAULT_ANNUAL_PROJECTION,
                year2_prediction: DEFAULT_ANNUAL_PROJECTION,
            };
        }

        let values: Vec<f64> = history.iter().map(|v| v.value).collect();
        let model = fit_trend(history, DEFAULT_ANNUAL_PROJECTION);
        let std_dev = population_std(&values);

        // Recent years weigh more: linear weights from 0.5 to 1.5.
        let weighted = weighted_average(&values);
        let base_weekly = weighted / 4.0;

        let multipliers = match model.trend {
            Trend::Increasing => [1.0, 1.05, 1.10, 1.15],
            Trend::Decreasing => [1.0, 0.95, 0.90, 0.85],
            Trend::Stable | Trend::Normal => [1.0; 4],
        };

        let mut weeks = [0.0; 4];
        for (week, multiplier) in weeks.iter_mut().zip(multipliers) {
            *week = round1((base_weekly * multiplier + self.noise(std_dev / 8.0)).max(0.0));
        }

        ThirtyDayOutlook {
            week1: weeks[0],
            week2: weeks[1],
            week3: weeks[2],
            week4: weeks[3],
            total: round1(weeks.iter().sum()),
            confidence: confidence_score(&values),
            trend: model.trend,
            average: round1(model.average),
            year1_prediction: round1(model.year1),
            year2_prediction: round1(model.year2),
        }
    }

    fn noise(&mut self, std_dev: f64) -> f64 {
        if std_dev <= 0.0 {
            return 0.0;
        }
        match Normal::new(0.0, std_dev) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(_) => 0.0,
        }
    }
}

/// Project same-month rainfall for the next two years.
pub fn monthly_projection(history: &[YearlyValue]) -> MonthlyProjection {
    let model: TrendModel = fit_trend(history, DEFAULT_MONTHLY_PROJECTION);
    MonthlyProjection {
        year1: round1(model.year1),
        year2: round1(model.year2),
        trend: model.trend,
    }
}

fn weighted_average(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return values[0];
    }
    let mut weight_sum = 0.0;
    let mut acc = 0.0;
    for (i, v) in values.iter().enumerate() {
        let w = 0.5 + i as f64 / (n - 1) as f64;
        weight_sum += w;
        acc += w * v;
    }
    acc / weight_sum
}

fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn yearly(start: i32, values: &[f64]) -> Vec<YearlyValue> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| YearlyValue::new(start + i as i32, *v))
            .collect()
    }

    #[test]
    fn thin_history_returns_documented_defaults() {
        let mut predictor = RainfallPredictor::with_seed(7);
        let outlook = predictor.thirty_day_outlook(&yearly(2020, &[500.0, 520.0]));
        assert_eq!(outlook.week1, 50.0);
        assert_eq!(outlook.total, 170.0);
        assert_eq!(outlook.trend, Trend::Normal);
        assert_eq!(outlook.year1_prediction, 600.0);
        assert_eq!(outlook.confidence, 50.0);
    }

    #[test]
    fn same_seed_reproduces_outlook() {
        let history = yearly(2008, &(0..16).map(|i| 400.0 + 7.0 * i as f64).collect::<Vec<_>>());
        let a = RainfallPredictor::with_seed(42).thirty_day_outlook(&history);
        let b = RainfallPredictor::with_seed(42).thirty_day_outlook(&history);
        assert_eq!(a, b);

        let c = RainfallPredictor::with_seed(43).thirty_day_outlook(&history);
        // Different seed draws different noise for a non-constant series.
        assert_ne!(a, c);
    }

    #[test]
    fn increasing_history_reports_increasing_trend() {
        let history = yearly(2010, &(0..14).map(|i| 300.0 + 10.0 * i as f64).collect::<Vec<_>>());
        let outlook = RainfallPredictor::with_seed(1).thirty_day_outlook(&history);
        assert_eq!(outlook.trend, Trend::Increasing);
        assert!(outlook.year1_prediction > outlook.average);
    }

    #[test]
    fn constant_history_has_no_noise() {
        let history = yearly(2010, &[400.0; 12]);
        let outlook = RainfallPredictor::with_seed(9).thirty_day_outlook(&history);
        // Zero spread: weekly values are exactly the weighted base.
        assert_relative_eq!(outlook.week1, 100.0);
        assert_relative_eq!(outlook.week2, 100.0);
        assert_eq!(outlook.trend, Trend::Stable);
        assert_relative_eq!(outlook.total, 400.0);
    }

    #[test]
    fn weighted_average_prefers_recent_years() {
        // Later values are larger, so the weighted mean exceeds the plain mean.
        let values: Vec<f64> = (0..10).map(|i| 100.0 + 10.0 * i as f64).collect();
        let plain = values.iter().sum::<f64>() / values.len() as f64;
        assert!(weighted_average(&values) > plain);
    }

    #[test]
    fn monthly_projection_mean_fallback() {
        let proj = monthly_projection(&yearly(2017, &[30.0, 50.0, 40.0, 60.0, 20.0]));
        assert_eq!(proj.trend, Trend::Normal);
        assert_relative_eq!(proj.year1, 40.0);

        let thin = monthly_projection(&yearly(2022, &[30.0]));
        assert_eq!(thin.year1, DEFAULT_MONTHLY_PROJECTION);
    }
}
