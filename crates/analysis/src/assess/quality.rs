//! Water-quality grading from spectral ratio means.

use serde::Serialize;

/// Labels derived from masked-water means of the quality ratios.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityAssessment {
    pub status: &'static str,
    pub turbidity_level: &'static str,
    pub chlorophyll_level: &'static str,
    pub pollution_risk: &'static str,
    pub sediment_level: &'static str,
}

/// Grade water quality from NDTI, CDOM, WRI and chlorophyll means.
///
/// The overall status cascades on all three of NDTI, CDOM and WRI; the
/// individual levels read one ratio each.
pub fn assess_quality(
    ndti_mean: f64,
    cdom_mean: f64,
    wri_mean: f64,
    chlorophyll_mean: f64,
) -> QualityAssessment {
    let status = if ndti_mean < 0.1 && cdom_mean < 1.0 && wri_mean < 1.2 {
        "Excellent - Clear Water"
    } else if ndti_mean < 0.2 && cdom_mean < 1.2 && wri_mean < 1.5 {
        "Good - Slightly Turbid"
    } else if ndti_mean < 0.3 && cdom_mean < 1.5 && wri_mean < 1.8 {
        "Moderate - Turbid"
    } else {
        "Poor - Highly Turbid/Polluted"
    };

    let turbidity_level = if ndti_mean < 0.1 {
        "Clear"
    } else if ndti_mean < 0.2 {
        "Slightly Turbid"
    } else if ndti_mean < 0.3 {
        "Moderately Turbid"
    } else {
        "Highly Turbid"
    };

    let chlorophyll_level = if chlorophyll_mean < 1.5 {
        "Low"
    } else if chlorophyll_mean < 2.5 {
        "Moderate"
    } else if chlorophyll_mean < 3.5 {
        "High"
    } else {
        "Very High"
    };

    let pollution_risk = if cdom_mean > 1.5 {
        "High Risk"
    } else if cdom_mean > 1.2 {
        "Moderate Risk"
    } else {
        "Low Risk"
    };

    let sediment_level = if wri_mean > 1.8 {
        "High Sediment"
    } else if wri_mean > 1.5 {
        "Moderate Sediment"
    } else {
        "Low Sediment"
    };

    QualityAssessment {
        status,
        turbidity_level,
        chlorophyll_level,
        pollution_risk,
        sediment_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_water_grades_excellent() {
        let q = assess_quality(0.05, 0.8, 1.0, 1.0);
        assert_eq!(q.status, "Excellent - Clear Water");
        assert_eq!(q.turbidity_level, "Clear");
        assert_eq!(q.pollution_risk, "Low Risk");
        assert_eq!(q.sediment_level, "Low Sediment");
    }

    #[test]
    fn one_bad_ratio_drops_the_overall_status() {
        // NDTI alone is excellent, CDOM pushes the cascade down.
        let q = assess_quality(0.05, 1.4, 1.0, 1.0);
        assert_eq!(q.status, "Moderate - Turbid");
        assert_eq!(q.turbidity_level, "Clear");
        assert_eq!(q.pollution_risk, "Moderate Risk");
    }

    #[test]
    fn polluted_water_grades_poor() {
        let q = assess_quality(0.35, 1.8, 2.0, 4.0);
        assert_eq!(q.status, "Poor - Highly Turbid/Polluted");
        assert_eq!(q.turbidity_level, "Highly Turbid");
        assert_eq!(q.chlorophyll_level, "Very High");
        assert_eq!(q.pollution_risk, "High Risk");
        assert_eq!(q.sediment_level, "High Sediment");
    }
}
