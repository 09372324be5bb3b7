//! Linear trend fitting over yearly aggregates

use agrolens_core::YearlyValue;
use serde::Serialize;

/// Categorical summary of a fitted slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    /// Too few points for a regression; projections fall back to the
    /// series mean or the documented default.
    Normal,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
            Trend::Normal => "normal",
        }
    }
}

/// Slope magnitude below which a fitted trend counts as stable.
pub const STABLE_SLOPE: f64 = 0.5;

/// Minimum points for mean-based projection.
pub const MIN_POINTS_FOR_MEAN: usize = 5;

/// Minimum points for an actual regression.
pub const MIN_POINTS_FOR_REGRESSION: usize = 10;

/// Fitted model with projections for the next two years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendModel {
    pub slope: f64,
    pub intercept: f64,
    pub trend: Trend,
    /// Mean of the input values (0 when the series is empty).
    pub average: f64,
    /// Projection for the year after the last observation, floored at 0.
    pub year1: f64,
    /// Projection for the second year out, floored at 0.
    pub year2: f64,
}

/// Fit a linear trend to yearly aggregates.
///
/// - fewer than [`MIN_POINTS_FOR_MEAN`] points: `default_projection` for
///   both years, trend [`Trend::Normal`]
/// - fewer than [`MIN_POINTS_FOR_REGRESSION`]: projections are the series
///   mean, trend [`Trend::Normal`]
/// - otherwise: ordinary least squares of value against year; slope above
///   [`STABLE_SLOPE`] is increasing, below its negation decreasing, else
///   stable; projections are the fitted line floored at 0
pub fn fit_trend(values: &[YearlyValue], default_projection: f64) -> TrendModel {
    if values.len() < MIN_POINTS_FOR_MEAN {
        let average = mean(values.iter().map(|v| v.value));
        return TrendModel {
            slope: 0.0,
            intercept: default_projection,
            trend: Trend::Normal,
            average,
            year1: default_projection,
            year2: default_projection,
        };
    }

    let average = mean(values.iter().map(|v| v.value));
    if values.len() < MIN_POINTS_FOR_REGRESSION {
        return TrendModel {
            slope: 0.0,
            intercept: average,
            trend: Trend::Normal,
            average,
            year1: average,
            year2: average,
        };
    }

    let (slope, intercept) = least_squares(values);
    let trend = if slope > STABLE_SLOPE {
        Trend::Increasing
    } else if slope < -STABLE_SLOPE {
        Trend::Decreasing
    } else {
        Trend::Stable
    };

    let last_year = values.iter().map(|v| v.year).max().unwrap_or(0);
    let project = |year: i32| (slope * year as f64 + intercept).max(0.0);

    TrendModel {
        slope,
        intercept,
        trend,
        average,
        year1: project(last_year + 1),
        year2: project(last_year + 2),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Ordinary least squares of value against year.
fn least_squares(values: &[YearlyValue]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean_x = values.iter().map(|v| v.year as f64).sum::<f64>() / n;
    let mean_y = values.iter().map(|v| v.value).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for v in values {
        let dx = v.year as f64 - mean_x;
        sxx += dx * dx;
        sxy += dx * (v.value - mean_y);
    }

    // Degenerate x spread cannot happen with distinct years, but guard the
    // division anyway: flat line through the mean.
    if sxx == 0.0 {
        return (0.0, mean_y);
    }

    let slope = sxy / sxx;
    (slope, mean_y - slope * mean_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn yearly(values: &[(i32, f64)]) -> Vec<YearlyValue> {
        values.iter().map(|(y, v)| YearlyValue::new(*y, *v)).collect()
    }

    #[test]
    fn too_few_points_uses_default() {
        let model = fit_trend(&yearly(&[(2020, 800.0), (2021, 700.0)]), 600.0);
        assert_eq!(model.trend, Trend::Normal);
        assert_eq!(model.year1, 600.0);
        assert_eq!(model.year2, 600.0);
    }

    #[test]
    fn mid_sized_series_projects_mean() {
        let data = yearly(&[
            (2018, 100.0),
            (2019, 200.0),
            (2020, 300.0),
            (2021, 400.0),
            (2022, 500.0),
        ]);
        let model = fit_trend(&data, 600.0);
        assert_eq!(model.trend, Trend::Normal);
        assert_relative_eq!(model.year1, 300.0);
        assert_relative_eq!(model.year2, 300.0);
    }

    #[test]
    fn twelve_increasing_points_fit_increasing() {
        let data: Vec<YearlyValue> = (0..12)
            .map(|i| YearlyValue::new(2010 + i, 500.0 + i as f64))
            .collect();
        let model = fit_trend(&data, 600.0);
        assert_eq!(model.trend, Trend::Increasing);
        assert_relative_eq!(model.slope, 1.0, epsilon = 1e-9);
        // Next year continues the line: last value 511, projection 512.
        assert_relative_eq!(model.year1, 512.0, epsilon = 1e-6);
        assert_relative_eq!(model.year2, 513.0, epsilon = 1e-6);
    }

    #[test]
    fn steep_decline_is_decreasing_and_floored() {
        let data: Vec<YearlyValue> = (0..10)
            .map(|i| YearlyValue::new(2014 + i, 90.0 - 10.0 * i as f64))
            .collect();
        let model = fit_trend(&data, 600.0);
        assert_eq!(model.trend, Trend::Decreasing);
        assert_eq!(model.year1, 0.0);
        assert_eq!(model.year2, 0.0);
    }

    #[test]
    fn flat_series_is_stable() {
        let data: Vec<YearlyValue> = (0..10)
            .map(|i| YearlyValue::new(2014 + i, 400.0 + if i % 2 == 0 { 0.2 } else { -0.2 }))
            .collect();
        let model = fit_trend(&data, 600.0);
        assert_eq!(model.trend, Trend::Stable);
    }
}
