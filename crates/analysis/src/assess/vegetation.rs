//! Healthy/stressed vegetation split per index.

use agrolens_core::IndexKind;
use serde::Serialize;

/// Value above which vegetation counts as healthy for an index; the
/// stressed band runs from `stressed_floor` up to the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthThresholds {
    pub healthy_above: f64,
    pub stressed_floor: f64,
}

/// Split thresholds for the supported vegetation indices.
pub fn health_thresholds(kind: IndexKind) -> HealthThresholds {
    match kind {
        IndexKind::Evi => HealthThresholds {
            healthy_above: 0.3,
            stressed_floor: 0.0,
        },
        IndexKind::Ndmi => HealthThresholds {
            healthy_above: 0.2,
            stressed_floor: -0.5,
        },
        IndexKind::Vci => HealthThresholds {
            healthy_above: 50.0,
            stressed_floor: 0.0,
        },
        _ => HealthThresholds {
            healthy_above: 0.4,
            stressed_floor: 0.0,
        },
    }
}

/// Percentage of classified vegetation that is healthy, 0 when nothing
/// was classified.
pub fn health_score(healthy_area: f64, stressed_area: f64) -> f64 {
    let total = healthy_area + stressed_area;
    if total > 0.0 {
        healthy_area / total * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn thresholds_depend_on_index() {
        assert_relative_eq!(health_thresholds(IndexKind::Ndvi).healthy_above, 0.4);
        assert_relative_eq!(health_thresholds(IndexKind::Evi).healthy_above, 0.3);
        assert_relative_eq!(health_thresholds(IndexKind::Ndmi).stressed_floor, -0.5);
        assert_relative_eq!(health_thresholds(IndexKind::Vci).healthy_above, 50.0);
        // Unsupported indices fall back to the NDVI split.
        assert_relative_eq!(health_thresholds(IndexKind::Ndre).healthy_above, 0.4);
    }

    #[test]
    fn score_is_guarded_against_empty_fields() {
        assert_relative_eq!(health_score(75.0, 25.0), 75.0);
        assert_eq!(health_score(0.0, 0.0), 0.0);
    }
}
