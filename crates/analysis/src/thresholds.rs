//! Per-crop vigor thresholds
//!
//! Classification bands are crop-specific: 0.55 NDVI is healthy wheat
//! but underperforming sugarcane. Unknown crops fall back to a generic
//! band set.

use serde::Serialize;

/// Four-band threshold ladder for one vegetation index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndexBands {
    pub low: f64,
    pub moderate: f64,
    pub good: f64,
    pub excellent: f64,
}

impl IndexBands {
    const fn new(low: f64, moderate: f64, good: f64, excellent: f64) -> Self {
        Self {
            low,
            moderate,
            good,
            excellent,
        }
    }

    /// Band label for a value, lowest band when below `low`.
    pub fn grade(&self, value: f64) -> &'static str {
        if value >= self.excellent {
            "Excellent"
        } else if value >= self.good {
            "Good"
        } else if value >= self.moderate {
            "Moderate"
        } else {
            "Low"
        }
    }
}

/// NDVI and EVI ladders plus the human-readable optimal range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CropThresholds {
    pub ndvi: IndexBands,
    pub evi: IndexBands,
    pub optimal_range: &'static str,
}

/// Thresholds for a crop name, case-insensitive; unknown names get the
/// generic band set.
pub fn crop_thresholds(crop: &str) -> CropThresholds {
    match crop.to_ascii_lowercase().as_str() {
        "rice" => CropThresholds {
            ndvi: IndexBands::new(0.2, 0.4, 0.6, 0.75),
            evi: IndexBands::new(0.15, 0.3, 0.45, 0.6),
            optimal_range: "NDVI: 0.6-0.8, EVI: 0.45-0.65",
        },
        "wheat" => CropThresholds {
            ndvi: IndexBands::new(0.15, 0.35, 0.55, 0.7),
            evi: IndexBands::new(0.1, 0.25, 0.4, 0.55),
            optimal_range: "NDVI: 0.55-0.75, EVI: 0.4-0.6",
        },
        "cotton" => CropThresholds {
            ndvi: IndexBands::new(0.2, 0.4, 0.6, 0.75),
            evi: IndexBands::new(0.15, 0.3, 0.45, 0.6),
            optimal_range: "NDVI: 0.6-0.8, EVI: 0.45-0.65",
        },
        "maize" => CropThresholds {
            ndvi: IndexBands::new(0.25, 0.45, 0.65, 0.8),
            evi: IndexBands::new(0.2, 0.35, 0.5, 0.65),
            optimal_range: "NDVI: 0.65-0.85, EVI: 0.5-0.7",
        },
        "sugarcane" => CropThresholds {
            ndvi: IndexBands::new(0.3, 0.5, 0.7, 0.85),
            evi: IndexBands::new(0.25, 0.4, 0.55, 0.7),
            optimal_range: "NDVI: 0.7-0.9, EVI: 0.55-0.75",
        },
        "barley" => CropThresholds {
            ndvi: IndexBands::new(0.15, 0.35, 0.55, 0.7),
            evi: IndexBands::new(0.1, 0.25, 0.4, 0.55),
            optimal_range: "NDVI: 0.55-0.75, EVI: 0.4-0.6",
        },
        "mustard" => CropThresholds {
            ndvi: IndexBands::new(0.2, 0.4, 0.6, 0.75),
            evi: IndexBands::new(0.15, 0.3, 0.45, 0.6),
            optimal_range: "NDVI: 0.6-0.8, EVI: 0.45-0.65",
        },
        _ => CropThresholds {
            ndvi: IndexBands::new(0.2, 0.4, 0.6, 0.8),
            evi: IndexBands::new(0.15, 0.3, 0.45, 0.6),
            optimal_range: "NDVI: 0.6-0.8, EVI: 0.45-0.65",
        },
    }
}
