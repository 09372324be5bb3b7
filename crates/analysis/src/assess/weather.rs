//! Weather summary labels for a growing window.

use serde::Serialize;

/// Mean temperature and total rainfall with derived status labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    pub avg_temperature: f64,
    pub total_rainfall: f64,
    pub stress_factors: Vec<&'static str>,
    pub temperature_status: &'static str,
    pub rainfall_status: &'static str,
}

/// Summarize a window's weather into crop-stress labels.
pub fn summarize_weather(avg_temp_c: f64, total_rainfall_mm: f64) -> WeatherSummary {
    let mut stress_factors = Vec::new();
    if avg_temp_c > 35.0 {
        stress_factors.push("Heat Stress");
    } else if avg_temp_c < 10.0 {
        stress_factors.push("Cold Stress");
    }
    if total_rainfall_mm < 50.0 {
        stress_factors.push("Drought");
    } else if total_rainfall_mm > 500.0 {
        stress_factors.push("Excess Rainfall");
    }
    if stress_factors.is_empty() {
        stress_factors.push("Normal Conditions");
    }

    WeatherSummary {
        avg_temperature: round1(avg_temp_c),
        total_rainfall: round1(total_rainfall_mm),
        stress_factors,
        temperature_status: if (15.0..=30.0).contains(&avg_temp_c) {
            "Optimal"
        } else {
            "Stressful"
        },
        rainfall_status: if (100.0..=400.0).contains(&total_rainfall_mm) {
            "Adequate"
        } else if total_rainfall_mm < 100.0 {
            "Inadequate"
        } else {
            "Excessive"
        },
    }
}

/// Summary reported when the weather source is unreachable.
pub fn unavailable_weather() -> WeatherSummary {
    WeatherSummary {
        avg_temperature: 0.0,
        total_rainfall: 0.0,
        stress_factors: vec!["Data Unavailable"],
        temperature_status: "Unknown",
        rainfall_status: "Unknown",
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperate_wet_window_is_normal() {
        let w = summarize_weather(24.0, 220.0);
        assert_eq!(w.stress_factors, vec!["Normal Conditions"]);
        assert_eq!(w.temperature_status, "Optimal");
        assert_eq!(w.rainfall_status, "Adequate");
    }

    #[test]
    fn hot_dry_window_stacks_stress_factors() {
        let w = summarize_weather(38.0, 20.0);
        assert_eq!(w.stress_factors, vec!["Heat Stress", "Drought"]);
        assert_eq!(w.temperature_status, "Stressful");
        assert_eq!(w.rainfall_status, "Inadequate");
    }

    #[test]
    fn cold_flooded_window() {
        let w = summarize_weather(5.0, 620.0);
        assert_eq!(w.stress_factors, vec!["Cold Stress", "Excess Rainfall"]);
        assert_eq!(w.rainfall_status, "Excessive");
    }
}
