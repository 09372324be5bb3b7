//! Advisory text from a short-range rainfall forecast.

use serde::Serialize;

/// Daily rainfall above this counts as heavy rain.
const HEAVY_RAIN_MM: f64 = 30.0;

/// Grouped recommendations for a 7-day outlook.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendations {
    pub water_management: Vec<String>,
    pub farming: Vec<String>,
    pub alerts: Vec<String>,
}

/// Build recommendations from daily rainfall amounts (mm), day 1 first.
pub fn generate_recommendations(daily_rainfall: &[f64]) -> Recommendations {
    let mut out = Recommendations::default();
    if daily_rainfall.is_empty() {
        return out;
    }

    let total: f64 = daily_rainfall.iter().sum();
    let first_heavy_day = daily_rainfall
        .iter()
        .position(|r| *r > HEAVY_RAIN_MM)
        .map(|i| i + 1);
    let dry_days = daily_rainfall.iter().filter(|r| **r == 0.0).count();

    if total > 100.0 {
        out.water_management
            .push("Good rainfall expected - reservoirs will fill".into());
    } else if total < 20.0 {
        out.water_management
            .push("Low rainfall - plan water conservation".into());
    }
    if let Some(day) = first_heavy_day {
        out.water_management
            .push(format!("Heavy rain on Day {day} - check dam gates"));
    }
    if dry_days >= 4 {
        out.water_management
            .push("Extended dry period - plan water storage".into());
    }

    if total > 50.0 && total < 150.0 {
        out.farming.push("Good time for planting (Week 1-2)".into());
    }
    if let Some(day) = first_heavy_day {
        out.farming
            .push(format!("Postpone fertilizer until after Day {day}"));
        out.farming
            .push(format!("Harvest ready crops before Day {day}"));
    }
    if dry_days >= 3 {
        out.farming.push("Plan irrigation for dry period".into());
    }

    if total > 150.0 {
        out.alerts.push("Heavy rainfall alert - flood risk".into());
    } else if total < 10.0 {
        out.alerts
            .push("Drought warning - very low rainfall".into());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_forecast_yields_nothing() {
        assert_eq!(generate_recommendations(&[]), Recommendations::default());
    }

    #[test]
    fn dry_week_warns_on_all_fronts() {
        let rec = generate_recommendations(&[0.0, 0.0, 1.0, 0.0, 0.5, 0.0, 0.0]);
        assert!(rec
            .water_management
            .contains(&"Low rainfall - plan water conservation".to_string()));
        assert!(rec
            .water_management
            .contains(&"Extended dry period - plan water storage".to_string()));
        assert!(rec.farming.contains(&"Plan irrigation for dry period".to_string()));
        assert_eq!(rec.alerts, vec!["Drought warning - very low rainfall"]);
    }

    #[test]
    fn heavy_rain_day_is_reported_one_based() {
        let rec = generate_recommendations(&[5.0, 10.0, 45.0, 20.0, 25.0, 30.0, 20.0]);
        assert!(rec
            .water_management
            .contains(&"Heavy rain on Day 3 - check dam gates".to_string()));
        assert!(rec
            .farming
            .contains(&"Postpone fertilizer until after Day 3".to_string()));
        // 155 mm total also trips the flood alert.
        assert_eq!(rec.alerts, vec!["Heavy rainfall alert - flood risk"]);
    }

    #[test]
    fn moderate_week_suggests_planting() {
        let rec = generate_recommendations(&[10.0, 15.0, 20.0, 10.0, 15.0, 10.0, 10.0]);
        assert!(rec.farming.contains(&"Good time for planting (Week 1-2)".to_string()));
        assert!(rec.alerts.is_empty());
    }
}
