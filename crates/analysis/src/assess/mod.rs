//! Label and summary derivations for aggregate readings.

pub mod moisture;
pub mod quality;
pub mod recommend;
pub mod vegetation;
pub mod water;
pub mod weather;
pub mod yield_estimate;

pub use moisture::{assess_moisture, MoistureAssessment};
pub use quality::{assess_quality, QualityAssessment};
pub use recommend::{generate_recommendations, Recommendations};
pub use vegetation::{health_score, health_thresholds, HealthThresholds};
pub use water::{
    drought_risk, drought_severity, percent_change, project_water_area, water_stress, water_type,
    WaterProjection,
};
pub use weather::{summarize_weather, unavailable_weather, WeatherSummary};
pub use yield_estimate::{estimate_yield, YieldEstimate};
