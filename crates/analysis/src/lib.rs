//! # AgroLens Analysis
//!
//! Pure analysis logic for AgroLens: everything here is deterministic
//! (or explicitly seeded) and free of I/O.
//!
//! ## Modules
//!
//! - **classification**: prioritized threshold rules over index surfaces
//! - **thresholds**: per-crop vigor bands
//! - **legend**: legend construction from classified areas
//! - **interpolate**: gap filling for monthly series
//! - **forecast**: trend fitting, rainfall outlooks, confidence scoring
//! - **assess**: label and summary derivations for aggregate readings

pub mod assess;
pub mod classification;
pub mod forecast;
pub mod interpolate;
pub mod legend;
pub mod thresholds;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::assess::{
        assess_moisture, assess_quality, estimate_yield, generate_recommendations, health_score,
        health_thresholds, summarize_weather, unavailable_weather, MoistureAssessment,
        QualityAssessment, Recommendations, WeatherSummary, YieldEstimate,
    };
    pub use crate::classification::{
        ai_water_mask, crop_rules, ensemble_water_mask, growth_stage_rules, gt, gte, lt, lte,
        moisture_rules, vegetation_health_rules, water_detectors, water_mask, yield_rules,
        AreaResult, ClassArea, ClassId, FallbackRule, Predicate, RuleSet,
    };
    pub use crate::forecast::{
        confidence_score, fit_trend, monthly_projection, MonthlyProjection, RainfallPredictor,
        ThirtyDayOutlook, Trend, TrendModel,
    };
    pub use crate::interpolate::{fill_gaps, fill_zero_gaps};
    pub use crate::legend::{build_legend, Legend, LegendEntry};
    pub use crate::thresholds::{crop_thresholds, CropThresholds, IndexBands};
    pub use agrolens_core::prelude::*;
}
