//! NASA POWER daily precipitation client.

use std::collections::BTreeMap;
use std::time::Duration;

use agrolens_core::{DateWindow, YearlyValue};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::http::RetryClient;

const POWER_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";

// ---------------------------------------------------------------------------
// Wire models
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: PowerParameter,
}

#[derive(Debug, Deserialize)]
struct PowerParameter {
    /// Corrected daily precipitation keyed by `"YYYYMMDD"`.
    #[serde(rename = "PRECTOTCORR")]
    precipitation: BTreeMap<String, f64>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Async client for the NASA POWER daily point endpoint.
pub struct NasaPowerClient {
    http: RetryClient,
}

impl NasaPowerClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: RetryClient::new(Duration::from_secs(30), 2)?,
        })
    }

    /// Daily precipitation (mm) for a point over a window, ascending.
    ///
    /// The POWER missing-data sentinel (negative values) is dropped.
    pub async fn daily_precipitation(
        &self,
        lat: f64,
        lon: f64,
        window: &DateWindow,
    ) -> Result<Vec<(NaiveDate, f64)>> {
        let query = [
            ("parameters", "PRECTOTCORR".to_string()),
            ("community", "AG".to_string()),
            ("longitude", lon.to_string()),
            ("latitude", lat.to_string()),
            ("start", window.start.format("%Y%m%d").to_string()),
            ("end", window.end.format("%Y%m%d").to_string()),
            ("format", "JSON".to_string()),
        ];
        let resp = self.http.get_with_query(POWER_URL, &query).await?;
        let body: PowerResponse = resp.json().await?;

        let mut days = Vec::with_capacity(body.properties.parameter.precipitation.len());
        for (key, value) in &body.properties.parameter.precipitation {
            if *value < 0.0 {
                continue;
            }
            if let Ok(date) = NaiveDate::parse_from_str(key, "%Y%m%d") {
                days.push((date, *value));
            }
        }
        debug!(days = days.len(), "fetched daily precipitation");
        Ok(days)
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Annual totals from daily records, years without rain dropped.
pub fn yearly_totals(daily: &[(NaiveDate, f64)]) -> Vec<YearlyValue> {
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for (date, value) in daily {
        *by_year.entry(date.year()).or_default() += value;
    }
    by_year
        .into_iter()
        .filter(|(_, total)| *total > 0.0)
        .map(|(year, total)| YearlyValue::new(year, round1(total)))
        .collect()
}

/// Per-year totals for one calendar month.
pub fn same_month_totals(daily: &[(NaiveDate, f64)], month: u32) -> Vec<YearlyValue> {
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for (date, value) in daily {
        if date.month() == month {
            *by_year.entry(date.year()).or_default() += value;
        }
    }
    by_year
        .into_iter()
        .map(|(year, total)| YearlyValue::new(year, round1(total)))
        .collect()
}

/// Mean daily rainfall for one calendar month across years.
pub fn month_daily_average(daily: &[(NaiveDate, f64)], month: u32) -> f64 {
    let values: Vec<f64> = daily
        .iter()
        .filter(|(date, _)| date.month() == month)
        .map(|(_, v)| *v)
        .collect();
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn yearly_totals_skip_dry_years() {
        let daily = vec![
            (d(2022, 6, 1), 10.0),
            (d(2022, 7, 1), 5.5),
            (d(2023, 1, 1), 0.0),
            (d(2024, 6, 1), 2.0),
        ];
        let totals = yearly_totals(&daily);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].year, 2022);
        assert_relative_eq!(totals[0].value, 15.5);
        assert_eq!(totals[1].year, 2024);
    }

    #[test]
    fn same_month_groups_across_years() {
        let daily = vec![
            (d(2022, 6, 1), 10.0),
            (d(2022, 7, 1), 99.0),
            (d(2023, 6, 15), 4.0),
            (d(2023, 6, 16), 6.0),
        ];
        let totals = same_month_totals(&daily, 6);
        assert_eq!(totals.len(), 2);
        assert_relative_eq!(totals[0].value, 10.0);
        assert_relative_eq!(totals[1].value, 10.0);
    }

    #[test]
    fn month_average_ignores_other_months() {
        let daily = vec![(d(2023, 6, 1), 4.0), (d(2023, 6, 2), 8.0), (d(2023, 7, 1), 100.0)];
        assert_relative_eq!(month_daily_average(&daily, 6), 6.0);
        assert_eq!(month_daily_average(&daily, 2), 0.0);
    }
}
