//! OpenWeatherMap 5-day forecast client.

use std::collections::HashMap;
use std::time::Duration;

use chrono::DateTime;
use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::http::RetryClient;
use crate::provider::DailyForecast;

const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// 5 days of 3-hourly slots.
const SLOT_COUNT: u32 = 40;

// ---------------------------------------------------------------------------
// Wire models
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastSlot>,
}

#[derive(Debug, Deserialize)]
struct ForecastSlot {
    /// Unix timestamp, UTC.
    dt: i64,
    main: SlotMain,
    wind: SlotWind,
    #[serde(default)]
    weather: Vec<SlotWeather>,
    #[serde(default)]
    rain: Option<SlotRain>,
}

#[derive(Debug, Deserialize)]
struct SlotMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct SlotWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct SlotWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct SlotRain {
    #[serde(rename = "3h", default)]
    three_hour: f64,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Async client for the OpenWeatherMap forecast endpoint.
pub struct OpenWeatherClient {
    http: RetryClient,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: RetryClient::new(Duration::from_secs(15), 2)?,
            api_key: api_key.into(),
        })
    }

    /// 7-day daily forecast aggregated from 3-hourly slots.
    pub async fn daily_forecast(&self, lat: f64, lon: f64) -> Result<Vec<DailyForecast>> {
        let query = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
            ("cnt", SLOT_COUNT.to_string()),
        ];
        let resp = self.http.get_with_query(FORECAST_URL, &query).await?;
        let body: ForecastResponse = resp.json().await?;

        if body.list.is_empty() {
            return Err(EngineError::DataUnavailable(
                "empty forecast response".into(),
            ));
        }
        debug!(slots = body.list.len(), "aggregating forecast slots");
        Ok(aggregate_daily(&body.list))
    }
}

/// Collapse 3-hourly slots into at most 7 daily records.
fn aggregate_daily(slots: &[ForecastSlot]) -> Vec<DailyForecast> {
    let mut days: Vec<DailyForecast> = Vec::new();
    let mut current: Option<DayAccumulator> = None;

    for slot in slots {
        let Some(dt) = DateTime::from_timestamp(slot.dt, 0) else {
            continue;
        };
        let date = dt.format("%Y-%m-%d").to_string();

        match current.as_mut() {
            Some(acc) if acc.date == date => acc.push(slot),
            _ => {
                if let Some(done) = current.take() {
                    days.push(done.finish());
                }
                let mut acc = DayAccumulator::new(date);
                acc.push(slot);
                current = Some(acc);
            }
        }
    }
    if let Some(done) = current {
        days.push(done.finish());
    }

    days.truncate(7);
    days
}

struct DayAccumulator {
    date: String,
    rain: f64,
    temps: Vec<f64>,
    humidities: Vec<f64>,
    winds: Vec<f64>,
    descriptions: Vec<String>,
}

impl DayAccumulator {
    fn new(date: String) -> Self {
        Self {
            date,
            rain: 0.0,
            temps: Vec::new(),
            humidities: Vec::new(),
            winds: Vec::new(),
            descriptions: Vec::new(),
        }
    }

    fn push(&mut self, slot: &ForecastSlot) {
        self.rain += slot.rain.as_ref().map_or(0.0, |r| r.three_hour);
        self.temps.push(slot.main.temp);
        self.humidities.push(slot.main.humidity);
        self.winds.push(slot.wind.speed);
        if let Some(w) = slot.weather.first() {
            self.descriptions.push(w.main.clone());
        }
    }

    fn finish(self) -> DailyForecast {
        DailyForecast {
            date: self.date,
            rainfall: round1(self.rain),
            temp: round1(mean(&self.temps)),
            humidity: mean(&self.humidities).round(),
            wind_speed: round1(mean(&self.winds)),
            description: modal(&self.descriptions),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Most frequent entry, ties broken by first occurrence.
fn modal(values: &[String]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        *counts.entry(v.as_str()).or_default() += 1;
    }
    let mut best: Option<(&String, usize)> = None;
    for v in values {
        let count = counts.get(v.as_str()).copied().unwrap_or(0);
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((v, count));
        }
    }
    best.map(|(v, _)| v.clone()).unwrap_or_default()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(dt: i64, temp: f64, rain: f64, desc: &str) -> ForecastSlot {
        ForecastSlot {
            dt,
            main: SlotMain {
                temp,
                humidity: 60.0,
            },
            wind: SlotWind { speed: 3.0 },
            weather: vec![SlotWeather {
                main: desc.to_string(),
            }],
            rain: (rain > 0.0).then_some(SlotRain { three_hour: rain }),
        }
    }

    #[test]
    fn slots_collapse_into_days() {
        // Two days of slots, 2024-06-01 and 2024-06-02 UTC.
        let day1 = 1717200000;
        let slots = vec![
            slot(day1, 28.0, 2.0, "Rain"),
            slot(day1 + 3 * 3600, 30.0, 1.5, "Rain"),
            slot(day1 + 6 * 3600, 32.0, 0.0, "Clouds"),
            slot(day1 + 86400, 26.0, 0.0, "Clear"),
        ];
        let days = aggregate_daily(&slots);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2024-06-01");
        assert_eq!(days[0].rainfall, 3.5);
        assert_eq!(days[0].temp, 30.0);
        assert_eq!(days[0].description, "Rain");
        assert_eq!(days[1].date, "2024-06-02");
        assert_eq!(days[1].rainfall, 0.0);
    }

    #[test]
    fn no_more_than_seven_days() {
        let day = 1717200000;
        let slots: Vec<_> = (0..80).map(|i| slot(day + i * 10800, 25.0, 0.0, "Clear")).collect();
        assert_eq!(aggregate_daily(&slots).len(), 7);
    }

    #[test]
    fn modal_breaks_ties_by_first_seen() {
        let values = vec!["Rain".to_string(), "Clear".to_string()];
        assert_eq!(modal(&values), "Rain");
    }
}
