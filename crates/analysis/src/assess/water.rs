//! Surface-water assessment labels
//!
//! Pure classification of aggregate numbers into the severity and status
//! strings the response models carry. Percentage changes are guarded:
//! a zero baseline yields 0, never a division error.

use serde::Serialize;

/// Percent change of `current` against `baseline`, 0 when the baseline
/// is not positive.
pub fn percent_change(baseline: f64, current: f64) -> f64 {
    if baseline > 0.0 {
        (current - baseline) / baseline * 100.0
    } else {
        0.0
    }
}

/// Drought severity from monsoon and post-monsoon water extents.
pub fn drought_severity(monsoon_km2: f64, post_monsoon_km2: f64) -> &'static str {
    let deficit = if monsoon_km2 > 0.0 {
        (monsoon_km2 - post_monsoon_km2) / monsoon_km2 * 100.0
    } else {
        0.0
    };
    if deficit < 10.0 {
        "No Drought"
    } else if deficit < 25.0 {
        "Mild Drought"
    } else if deficit < 50.0 {
        "Moderate Drought"
    } else if deficit < 75.0 {
        "Severe Drought"
    } else {
        "Extreme Drought"
    }
}

/// Water-stress class from the share of monsoon water that is permanent.
pub fn water_stress(permanent_km2: f64, monsoon_km2: f64) -> &'static str {
    let ratio = if monsoon_km2 > 0.0 {
        permanent_km2 / monsoon_km2 * 100.0
    } else {
        0.0
    };
    if ratio > 70.0 {
        "Low Stress"
    } else if ratio > 50.0 {
        "Moderate Stress"
    } else if ratio > 30.0 {
        "High Stress"
    } else {
        "Critical Stress"
    }
}

/// Water-body type from mean water-index values over detected water.
pub fn water_type(ndwi_mean: f64, mndwi_mean: f64, awei_mean: f64) -> &'static str {
    if mndwi_mean > 0.5 && ndwi_mean > 0.5 {
        "Permanent Water Body"
    } else if awei_mean > 0.5 {
        "Urban Water Body"
    } else if mndwi_mean > 0.3 {
        "Seasonal Water"
    } else {
        "Temporary Water/Wet Soil"
    }
}

/// Short-horizon water-area projection from the spread between the
/// ensemble and single-index detections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterProjection {
    pub one_month_km2: f64,
    pub three_month_km2: f64,
    pub trend: &'static str,
}

pub fn project_water_area(ensemble_km2: f64, reference_km2: f64) -> WaterProjection {
    let shift = percent_change(reference_km2, ensemble_km2);
    if shift > 10.0 {
        WaterProjection {
            one_month_km2: ensemble_km2 * 1.05,
            three_month_km2: ensemble_km2 * 1.15,
            trend: "Increasing",
        }
    } else if shift < -10.0 {
        WaterProjection {
            one_month_km2: ensemble_km2 * 0.95,
            three_month_km2: ensemble_km2 * 0.85,
            trend: "Decreasing",
        }
    } else {
        WaterProjection {
            one_month_km2: ensemble_km2,
            three_month_km2: ensemble_km2,
            trend: "Stable",
        }
    }
}

/// Drought risk from current extent and the projection trend.
pub fn drought_risk(water_km2: f64, trend: &str) -> &'static str {
    if water_km2 < 0.5 && trend == "Decreasing" {
        "High Risk"
    } else if water_km2 < 1.0 || trend == "Decreasing" {
        "Moderate Risk"
    } else {
        "Low Risk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn percent_change_guards_zero_baseline() {
        assert_eq!(percent_change(0.0, 5.0), 0.0);
        assert_eq!(percent_change(-1.0, 5.0), 0.0);
        assert_relative_eq!(percent_change(10.0, 15.0), 50.0);
        assert_relative_eq!(percent_change(10.0, 5.0), -50.0);
    }

    #[test]
    fn drought_severity_bands() {
        assert_eq!(drought_severity(10.0, 9.5), "No Drought");
        assert_eq!(drought_severity(10.0, 8.0), "Mild Drought");
        assert_eq!(drought_severity(10.0, 6.0), "Moderate Drought");
        assert_eq!(drought_severity(10.0, 3.0), "Severe Drought");
        assert_eq!(drought_severity(10.0, 1.0), "Extreme Drought");
        // No monsoon water means no measurable deficit.
        assert_eq!(drought_severity(0.0, 0.0), "No Drought");
    }

    #[test]
    fn stress_falls_back_to_critical_without_monsoon_water() {
        assert_eq!(water_stress(8.0, 10.0), "Low Stress");
        assert_eq!(water_stress(6.0, 10.0), "Moderate Stress");
        assert_eq!(water_stress(4.0, 10.0), "High Stress");
        assert_eq!(water_stress(1.0, 10.0), "Critical Stress");
        assert_eq!(water_stress(1.0, 0.0), "Critical Stress");
    }

    #[test]
    fn water_type_prefers_permanent() {
        assert_eq!(water_type(0.6, 0.6, 0.9), "Permanent Water Body");
        assert_eq!(water_type(0.2, 0.2, 0.6), "Urban Water Body");
        assert_eq!(water_type(0.2, 0.4, 0.1), "Seasonal Water");
        assert_eq!(water_type(0.1, 0.1, 0.1), "Temporary Water/Wet Soil");
    }

    #[test]
    fn projections_follow_the_shift() {
        let up = project_water_area(2.4, 2.0);
        assert_eq!(up.trend, "Increasing");
        assert_relative_eq!(up.three_month_km2, 2.4 * 1.15);

        let flat = project_water_area(2.0, 2.1);
        assert_eq!(flat.trend, "Stable");
        assert_relative_eq!(flat.one_month_km2, 2.0);
    }

    #[test]
    fn drought_risk_combines_extent_and_trend() {
        assert_eq!(drought_risk(0.3, "Decreasing"), "High Risk");
        assert_eq!(drought_risk(0.8, "Stable"), "Moderate Risk");
        assert_eq!(drought_risk(3.0, "Decreasing"), "Moderate Risk");
        assert_eq!(drought_risk(3.0, "Stable"), "Low Risk");
    }
}
