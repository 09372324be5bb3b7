//! Soil-moisture grading from mean NDMI.

use serde::Serialize;

/// Moisture labels plus the irrigation flag for one NDMI reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoistureAssessment {
    pub level: &'static str,
    pub status: &'static str,
    pub water_stress: &'static str,
    pub irrigation_needed: bool,
}

pub fn assess_moisture(ndmi_mean: f64) -> MoistureAssessment {
    let (level, status, water_stress) = if ndmi_mean > 0.3 {
        ("Very Moist", "Excellent", "None")
    } else if ndmi_mean > 0.2 {
        ("Moist", "Good", "Low")
    } else if ndmi_mean > 0.0 {
        ("Moderate", "Fair", "Moderate")
    } else if ndmi_mean > -0.2 {
        ("Dry", "Poor", "High")
    } else {
        ("Very Dry", "Critical", "Severe")
    };
    MoistureAssessment {
        level,
        status,
        water_stress,
        irrigation_needed: matches!(water_stress, "High" | "Severe"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moist_field_needs_no_irrigation() {
        let m = assess_moisture(0.25);
        assert_eq!(m.level, "Moist");
        assert_eq!(m.status, "Good");
        assert!(!m.irrigation_needed);
    }

    #[test]
    fn dry_bands_raise_the_irrigation_flag() {
        assert!(assess_moisture(-0.1).irrigation_needed);
        assert!(assess_moisture(-0.5).irrigation_needed);
        assert!(!assess_moisture(0.1).irrigation_needed);
    }

    #[test]
    fn band_edges() {
        assert_eq!(assess_moisture(0.31).level, "Very Moist");
        // 0.3 itself belongs to the band below.
        assert_eq!(assess_moisture(0.3).level, "Moist");
        assert_eq!(assess_moisture(0.0).level, "Dry");
        assert_eq!(assess_moisture(-0.2).level, "Very Dry");
    }
}
