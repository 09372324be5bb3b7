//! Vegetation-index analysis over a farm region.

use std::collections::BTreeMap;

use agrolens_analysis::assess::{
    assess_moisture, health_score, health_thresholds, summarize_weather, unavailable_weather,
    MoistureAssessment, WeatherSummary,
};
use agrolens_analysis::classification::{gt, vegetation_health_rules, Predicate};
use agrolens_analysis::legend::{build_legend, Legend};
use agrolens_core::{DateWindow, IndexKind};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::backend::Backend;
use crate::error::Result;
use crate::fallback::SourceChain;
use crate::provider::EarthObservation;
use crate::provider::ZonalTarget;
use crate::timeseries::TimeSeriesBuilder;
use crate::workflows::crop::{class_layers, CropArea, SeriesReport};
use crate::workflows::{round1, round3, ChangeRequest, AREA_SCALE, MEAN_SCALE};
use crate::zonal::ZonalAggregator;

/// Two periods plus the index to analyze.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexAnalysisRequest {
    #[serde(flatten)]
    pub change: ChangeRequest,
    pub index: IndexKind,
}

/// Vegetation-index change and health report.
#[derive(Debug, Clone, Serialize)]
pub struct IndexAnalysisReport {
    pub index: &'static str,
    pub mean_period1: f64,
    pub mean_period2: f64,
    pub change: f64,
    /// Guarded percent change, 0 on a non-positive baseline.
    pub change_percent: f64,
    pub healthy_area_acres: f64,
    pub stressed_area_acres: f64,
    pub health_score: f64,
    pub category_areas: Vec<CropArea>,
    pub legend: Legend,
    pub layers: BTreeMap<String, String>,
    pub soil_moisture: MoistureAssessment,
    pub ndmi_mean: f64,
    pub weather: WeatherSummary,
    pub series: SeriesReport,
}

/// Analyze a vegetation index across two periods.
pub async fn index_analysis<E: EarthObservation>(
    backend: &Backend<E>,
    chain: &SourceChain,
    request: &IndexAnalysisRequest,
) -> Result<IndexAnalysisReport> {
    let (region, window1, window2) = request.change.validate()?;
    let kind = request.index;
    info!(index = kind.name(), "vegetation index analysis");

    let provider = backend.ensure_ready().await?;
    let scene1 = chain.require_composite(provider, &region, &window1).await?;
    let scene2 = chain.require_composite(provider, &region, &window2).await?;

    let agg1 = ZonalAggregator::new(provider, &scene1, &region, MEAN_SCALE);
    let agg2 = ZonalAggregator::new(provider, &scene2, &region, MEAN_SCALE);
    let mean1 = agg1.surface_mean(kind).await?.unwrap_or(0.0);
    let mean2 = agg2.surface_mean(kind).await?.unwrap_or(0.0);
    let change = mean2 - mean1;
    let change_percent = if mean1.abs() > f64::EPSILON {
        change / mean1.abs() * 100.0
    } else {
        0.0
    };

    // Health split runs on the current period's composite.
    let area_agg = ZonalAggregator::new(provider, &scene2, &region, AREA_SCALE);
    let split = health_thresholds(kind);
    let healthy = gt(kind, split.healthy_above);
    let stressed = stressed_mask(kind, split.stressed_floor, split.healthy_above);
    let healthy_km2 = area_agg.mask_area_km2(&healthy).await?.unwrap_or(0.0);
    let stressed_km2 = area_agg.mask_area_km2(&stressed).await?.unwrap_or(0.0);
    let healthy_acres = km2_to_acres(healthy_km2);
    let stressed_acres = km2_to_acres(stressed_km2);

    let rules = vegetation_health_rules(kind);
    let areas = area_agg.class_areas(&rules).await?;
    let (legend, included) = build_legend(&areas);
    let layers = class_layers(provider, &scene2, &rules, &included).await?;

    let ndmi_mean = agg2.surface_mean(IndexKind::Ndmi).await?.unwrap_or(0.0);
    let soil_moisture = assess_moisture(ndmi_mean);

    let weather = match provider.climate(&region, &window2).await? {
        Some(sample) => summarize_weather(sample.avg_temp_c, sample.total_rain_mm),
        None => unavailable_weather(),
    };

    let full_range = DateWindow::new(window1.start, window2.end)?;
    let builder = TimeSeriesBuilder::new(provider, chain, MEAN_SCALE);
    let series = builder
        .monthly_series(&region, full_range, &[ZonalTarget::Surface(kind)])
        .await?;

    Ok(IndexAnalysisReport {
        index: kind.name(),
        mean_period1: round3(mean1),
        mean_period2: round3(mean2),
        change: round3(change),
        change_percent: round1(change_percent),
        healthy_area_acres: round1(healthy_acres),
        stressed_area_acres: round1(stressed_acres),
        health_score: round1(health_score(healthy_acres, stressed_acres)),
        category_areas: areas
            .classes()
            .iter()
            .map(|c| CropArea {
                label: c.label,
                area_km2: round3(c.area),
            })
            .collect(),
        legend,
        layers,
        soil_moisture,
        ndmi_mean: round3(ndmi_mean),
        weather,
        series: SeriesReport::from_series(&series[0]),
    })
}

/// Index in `(floor, threshold]`: vegetated but underperforming.
fn stressed_mask(kind: IndexKind, floor: f64, threshold: f64) -> Predicate {
    gt(kind, floor).and(gt(kind, threshold).not())
}

fn km2_to_acres(km2: f64) -> f64 {
    km2 * 1e6 / 4047.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn stressed_band_excludes_the_healthy_side() {
        let mask = stressed_mask(IndexKind::Ndvi, 0.0, 0.4);
        let sample = |v: f64| move |k: IndexKind| (k == IndexKind::Ndvi).then_some(v);
        assert!(mask.eval(&sample(0.2)));
        assert!(!mask.eval(&sample(0.5)));
        assert!(!mask.eval(&sample(-0.1)));
        // The threshold itself is stressed, not healthy.
        assert!(mask.eval(&sample(0.4)));
    }

    #[test]
    fn acre_conversion() {
        assert_relative_eq!(km2_to_acres(1.0), 247.096, epsilon = 0.01);
    }
}
