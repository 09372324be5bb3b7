//! Rainfall forecast workflow.

use agrolens_analysis::assess::{generate_recommendations, Recommendations};
use agrolens_analysis::forecast::{
    monthly_projection, MonthlyProjection, RainfallPredictor, ThirtyDayOutlook,
};
use agrolens_core::{DateWindow, Region, YearlyValue};
use chrono::{Datelike, Duration as ChronoDuration, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::Result;
use crate::provider::{DailyForecast, WeatherProvider};
use crate::weather::{same_month_totals, yearly_totals};

/// Days of history backing the projections, roughly 20 years.
const HISTORY_DAYS: i64 = 7300;

/// Rainfall forecast request: a region and a reference date.
#[derive(Debug, Clone, Deserialize)]
pub struct RainfallRequest {
    pub roi: Value,
}

/// Combined forecast, history and projections for a region.
#[derive(Debug, Clone, Serialize)]
pub struct RainfallReport {
    pub location: Location,
    pub forecast_7day: Vec<DailyForecast>,
    pub prediction_30day: ThirtyDayOutlook,
    pub historical: Vec<YearlyValue>,
    pub monthly_historical: Vec<YearlyValue>,
    pub monthly_prediction: MonthlyProjection,
    pub recommendations: Recommendations,
}

#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// Forecast and project rainfall for a region's centroid.
pub async fn rainfall_forecast<W: WeatherProvider>(
    weather: &W,
    request: &RainfallRequest,
    today: NaiveDate,
    predictor: &mut RainfallPredictor,
) -> Result<RainfallReport> {
    let region = Region::from_geojson(&request.roi)?;
    let (lat, lon) = region.centroid()?;
    info!(lat, lon, "rainfall forecast");

    let forecast = weather.forecast(lat, lon).await?;

    let history_window = DateWindow::new(today - ChronoDuration::days(HISTORY_DAYS), today)?;
    let daily = weather.historical_daily(lat, lon, &history_window).await?;

    let historical = last_n(yearly_totals(&daily), 20);
    let monthly_historical = last_n(same_month_totals(&daily, today.month()), 20);

    let prediction_30day = predictor.thirty_day_outlook(&historical);
    let monthly_prediction = monthly_projection(&monthly_historical);

    let daily_rain: Vec<f64> = forecast.iter().map(|d| d.rainfall).collect();
    let recommendations = generate_recommendations(&daily_rain);

    Ok(RainfallReport {
        location: Location {
            lat: round4(lat),
            lon: round4(lon),
        },
        forecast_7day: forecast,
        prediction_30day,
        historical,
        monthly_historical,
        monthly_prediction,
        recommendations,
    })
}

fn last_n(mut values: Vec<YearlyValue>, n: usize) -> Vec<YearlyValue> {
    if values.len() > n {
        values.drain(..values.len() - n);
    }
    values
}

fn round4(v: f64) -> f64 {
    (v * 10000.0).round() / 10000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_n_keeps_the_tail() {
        let values: Vec<_> = (2000..2025).map(|y| YearlyValue::new(y, 1.0)).collect();
        let kept = last_n(values, 20);
        assert_eq!(kept.len(), 20);
        assert_eq!(kept[0].year, 2005);
        assert_eq!(kept[19].year, 2024);
    }
}
