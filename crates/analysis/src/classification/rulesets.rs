//! Built-in classification rule sets
//!
//! One data-driven table per analysis mode. Thresholds and colors follow
//! the operational Sentinel-2 calibration for Indian cropping seasons;
//! order within each set is priority order.

use agrolens_core::{IndexKind, Season};
use IndexKind::{Awei, Evi, Mndwi, Ndmi, Ndre, Ndvi, Ndwi, Vci, WaterProbability};

use super::predicate::{gt, gte, lt, lte, Predicate};
use super::rules::{FallbackRule, RuleSet};

/// Crop identification rules for the resolved season.
pub fn crop_rules(season: Season) -> RuleSet {
    match season {
        Season::Kharif | Season::Transition => RuleSet::new(
            "kharif_crops",
            vec![
                ("Rice", "#0066FF", gt(Mndwi, 0.15).and(gt(Ndvi, 0.4))),
                ("Sugarcane", "#32CD32", gt(Ndvi, 0.65).and(gt(Evi, 0.5))),
                (
                    "Cotton/Maize",
                    "#FFD700",
                    gt(Ndvi, 0.45).and(lt(Ndvi, 0.65)).and(lt(Mndwi, 0.1)),
                ),
            ],
            Some(FallbackRule {
                label: "Other Kharif",
                color: "#FF4500",
                floor: gt(Ndvi, 0.2),
            }),
        ),
        Season::Rabi => RuleSet::new(
            "rabi_crops",
            vec![
                ("Wheat", "#FFD700", gt(Ndvi, 0.55).and(lt(Mndwi, 0.05))),
                (
                    "Barley",
                    "#8B4513",
                    gt(Ndvi, 0.35).and(lt(Ndvi, 0.55)).and(gt(Evi, 0.25)),
                ),
                ("Mustard", "#FFFF00", gt(Ndvi, 0.4).and(gt(Evi, 0.3))),
            ],
            Some(FallbackRule {
                label: "Other Rabi",
                color: "#FF4500",
                floor: gt(Ndvi, 0.2),
            }),
        ),
    }
}

/// Growth-stage rules (NDVI bands from planting to harvest).
pub fn growth_stage_rules() -> RuleSet {
    RuleSet::new(
        "growth_stages",
        vec![
            ("Planting", "#8B4513", gt(Ndvi, 0.05).and(lt(Ndvi, 0.25))),
            ("Vegetative", "#90EE90", gt(Ndvi, 0.25).and(lt(Ndvi, 0.5))),
            ("Flowering", "#FFD700", gt(Ndvi, 0.5).and(lt(Ndvi, 0.75))),
            ("Harvest", "#FF4500", gt(Ndvi, 0.75)),
        ],
        None,
    )
}

/// Yield-potential rules over EVI, NDRE and NDMI.
pub fn yield_rules() -> RuleSet {
    RuleSet::new(
        "yield_potential",
        vec![
            (
                "Excellent Yield",
                "#00FF00",
                gt(Evi, 0.6).and(gt(Ndre, 0.2)).and(gt(Ndmi, 0.1)),
            ),
            (
                "Good Yield",
                "#90EE90",
                gt(Evi, 0.4)
                    .and(lte(Evi, 0.6))
                    .and(gt(Ndre, 0.15))
                    .and(gt(Ndmi, -0.1)),
            ),
            (
                "Average Yield",
                "#FFD700",
                gt(Evi, 0.3).and(lte(Evi, 0.4)).and(gt(Ndre, 0.1)),
            ),
            ("Poor Yield", "#FF4500", lte(Evi, 0.3).or(lte(Ndmi, -0.1))),
        ],
        None,
    )
}

/// Soil-moisture categories over NDMI.
pub fn moisture_rules() -> RuleSet {
    RuleSet::new(
        "soil_moisture",
        vec![
            ("Very Moist", "#191970", gt(Ndmi, 0.3)),
            ("Moist", "#87CEEB", gt(Ndmi, 0.2).and(lte(Ndmi, 0.3))),
            ("Moderate", "#FFD700", gt(Ndmi, 0.0).and(lte(Ndmi, 0.2))),
            ("Dry", "#DAA520", gt(Ndmi, -0.2).and(lte(Ndmi, 0.0))),
            ("Very Dry", "#8B4513", lte(Ndmi, -0.2)),
        ],
        None,
    )
}

/// Vegetation-health categories for a continuous index analysis.
///
/// Labels carry the value range, matching the presentation legend. The
/// last category is open above, the others are half-open `[min, max)`.
pub fn vegetation_health_rules(index: IndexKind) -> RuleSet {
    fn banded(
        name: &'static str,
        index: IndexKind,
        bands: [(&'static str, &'static str, f64, f64); 4],
    ) -> RuleSet {
        let last = bands.len() - 1;
        let rules = bands
            .iter()
            .enumerate()
            .map(|(i, (label, color, min, max))| {
                let p = if i == last {
                    gte(index, *min)
                } else {
                    gte(index, *min).and(lt(index, *max))
                };
                (*label, *color, p)
            })
            .collect();
        RuleSet::new(name, rules, None)
    }

    match index {
        IndexKind::Evi => banded(
            "evi_health",
            Evi,
            [
                ("Low (0.0-0.15)", "#FF4500", 0.0, 0.15),
                ("Moderate (0.15-0.3)", "#FFFF00", 0.15, 0.3),
                ("Good (0.3-0.45)", "#32CD32", 0.3, 0.45),
                ("Excellent (0.45-0.6)", "#006400", 0.45, 0.6),
            ],
        ),
        IndexKind::Ndmi => banded(
            "ndmi_health",
            Ndmi,
            [
                ("Dry (-0.5-0.0)", "#DAA520", -0.5, 0.0),
                ("Moderate (0.0-0.2)", "#FFD700", 0.0, 0.2),
                ("Moist (0.2-0.3)", "#87CEEB", 0.2, 0.3),
                ("Very Moist (0.3-0.5)", "#191970", 0.3, 0.5),
            ],
        ),
        IndexKind::Vci => banded(
            "vci_health",
            Vci,
            [
                ("Poor (0-25)", "#FF4500", 0.0, 25.0),
                ("Fair (25-50)", "#FFFF00", 25.0, 50.0),
                ("Good (50-75)", "#32CD32", 50.0, 75.0),
                ("Excellent (75-100)", "#006400", 75.0, 100.0),
            ],
        ),
        // NDVI is also the default when a request names an index that has
        // no dedicated band table.
        _ => banded(
            "ndvi_health",
            Ndvi,
            [
                ("Low (0.0-0.2)", "#FF4500", 0.0, 0.2),
                ("Moderate (0.2-0.4)", "#FFFF00", 0.2, 0.4),
                ("Good (0.4-0.6)", "#32CD32", 0.4, 0.6),
                ("Excellent (0.6-0.8)", "#006400", 0.6, 0.8),
            ],
        ),
    }
}

/// Combined NDWI/MNDWI water mask used across the water analyses.
pub fn water_mask() -> Predicate {
    gt(Ndwi, 0.3).or(gt(Mndwi, 0.3))
}

/// Probability-detector mask, the trend baseline for ensemble reports.
pub fn ai_water_mask() -> Predicate {
    gt(WaterProbability, 0.5)
}

/// Individual detector masks feeding the multi-method water ensemble.
pub fn water_detectors() -> [(&'static str, &'static str, Predicate); 4] {
    [
        ("ndwi_water", "#00FF00", gt(Ndwi, 0.3)),
        ("mndwi_water", "#FFFF00", gt(Mndwi, 0.3)),
        ("awei_water", "#FF00FF", gt(Awei, 0.0)),
        ("ai_water", "#00FFFF", ai_water_mask()),
    ]
}

/// Ensemble water mask: at least three of the four detectors agree.
pub fn ensemble_water_mask() -> Predicate {
    let masks: Vec<Predicate> = water_detectors()
        .into_iter()
        .map(|(_, _, p)| p)
        .collect();
    let triple = |a: usize, b: usize, c: usize| {
        masks[a].clone().and(masks[b].clone()).and(masks[c].clone())
    };
    triple(0, 1, 2)
        .or(triple(0, 1, 3))
        .or(triple(0, 2, 3))
        .or(triple(1, 2, 3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrolens_core::IndexKind;

    fn sample(values: &[(IndexKind, f64)]) -> impl Fn(IndexKind) -> Option<f64> + '_ {
        move |ix| values.iter().find(|(k, _)| *k == ix).map(|(_, v)| *v)
    }

    #[test]
    fn kharif_rice_beats_overlapping_rules() {
        let set = crop_rules(Season::Kharif);
        // High NDVI, high EVI and wet signal: matches both Rice and
        // Sugarcane predicates; Rice is earlier so it wins.
        let s = sample(&[(Ndvi, 0.7), (Evi, 0.6), (Mndwi, 0.2)]);
        let id = set.classify(&s).unwrap();
        assert_eq!(set.rules()[id.0 as usize].label, "Rice");
    }

    #[test]
    fn kharif_fallback_catches_sparse_vegetation() {
        let set = crop_rules(Season::Kharif);
        let s = sample(&[(Ndvi, 0.3), (Evi, 0.1), (Mndwi, 0.2)]);
        assert_eq!(set.classify(&s), Some(set.fallback_id()));
        // Below the floor: background.
        let bare = sample(&[(Ndvi, 0.1), (Evi, 0.0), (Mndwi, 0.0)]);
        assert_eq!(set.classify(&bare), None);
    }

    #[test]
    fn growth_stages_tile_the_range() {
        let set = growth_stage_rules();
        for (v, expect) in [
            (0.1, "Planting"),
            (0.3, "Vegetative"),
            (0.6, "Flowering"),
            (0.9, "Harvest"),
        ] {
            let values = [(Ndvi, v)];
            let s = sample(&values);
            let id = set.classify(&s).unwrap();
            assert_eq!(set.rules()[id.0 as usize].label, expect, "ndvi {v}");
        }
        // Bare soil below the planting threshold stays background.
        assert_eq!(set.classify(&sample(&[(Ndvi, 0.01)])), None);
    }

    #[test]
    fn yield_poor_class_catches_dry_fields() {
        let set = yield_rules();
        let s = sample(&[(Evi, 0.5), (Ndre, 0.3), (Ndmi, -0.3)]);
        // Wet-enough EVI but strongly negative NDMI: Good's NDMI gate
        // fails and the Poor disjunction catches it.
        let id = set.classify(&s).unwrap();
        assert_eq!(set.rules()[id.0 as usize].label, "Poor Yield");
    }

    #[test]
    fn ensemble_requires_three_detectors() {
        let two = sample(&[(Ndwi, 0.4), (Mndwi, 0.4), (Awei, -1.0), (WaterProbability, 0.2)]);
        assert!(!ensemble_water_mask().eval(&two));

        let three = sample(&[(Ndwi, 0.4), (Mndwi, 0.4), (Awei, 0.5), (WaterProbability, 0.2)]);
        assert!(ensemble_water_mask().eval(&three));

        let four = sample(&[(Ndwi, 0.4), (Mndwi, 0.4), (Awei, 0.5), (WaterProbability, 0.9)]);
        assert!(ensemble_water_mask().eval(&four));
    }

    #[test]
    fn health_rules_default_to_ndvi() {
        let set = vegetation_health_rules(IndexKind::Ndwi);
        assert_eq!(set.name, "ndvi_health");
        let set = vegetation_health_rules(IndexKind::Vci);
        let s = sample(&[(Vci, 80.0)]);
        let id = set.classify(&s).unwrap();
        assert_eq!(set.rules()[id.0 as usize].label, "Excellent (75-100)");
    }
}
