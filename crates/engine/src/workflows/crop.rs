//! Crop identification, growth stage and yield workflows.

use std::collections::BTreeMap;

use agrolens_analysis::assess::{
    estimate_yield, summarize_weather, unavailable_weather, WeatherSummary, YieldEstimate,
};
use agrolens_analysis::classification::{crop_rules, growth_stage_rules, yield_rules, RuleSet};
use agrolens_analysis::interpolate::fill_gaps;
use agrolens_analysis::legend::{build_legend, Legend};
use agrolens_analysis::thresholds::{crop_thresholds, CropThresholds};
use agrolens_core::{determine_season, IndexKind, SeasonType, TimeSeries};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::backend::Backend;
use crate::error::Result;
use crate::fallback::SourceChain;
use crate::provider::{EarthObservation, SceneHandle, VisParams, ZonalTarget};
use crate::timeseries::TimeSeriesBuilder;
use crate::workflows::{round1, round3, RegionRequest, AREA_SCALE, MEAN_SCALE};
use crate::zonal::ZonalAggregator;

/// Region, window and an optional forced season.
#[derive(Debug, Clone, Deserialize)]
pub struct CropRequest {
    #[serde(flatten)]
    pub region: RegionRequest,
    #[serde(default)]
    pub season: SeasonType,
}

/// Crop-type identification report.
#[derive(Debug, Clone, Serialize)]
pub struct CropTypeReport {
    pub season: &'static str,
    pub expected_crops: Vec<&'static str>,
    /// Label -> area km², rule order.
    pub crop_areas: Vec<CropArea>,
    pub dominant_crop: String,
    pub dominant_thresholds: CropThresholds,
    pub total_area_km2: f64,
    /// Share of the classified area assigned to a named crop, percent.
    pub health_score: f64,
    pub legend: Legend,
    /// Label -> tile URL, legend-filtered.
    pub layers: BTreeMap<String, String>,
    pub ndvi_series: SeriesReport,
    pub weather: WeatherSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct CropArea {
    pub label: &'static str,
    pub area_km2: f64,
}

/// A monthly series with gaps filled.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesReport {
    pub months: Vec<String>,
    pub values: Vec<f64>,
}

impl SeriesReport {
    pub fn from_series(series: &TimeSeries) -> Self {
        Self {
            months: series.months(),
            values: fill_gaps(&series.values()),
        }
    }
}

/// Identify the dominant crop for a season over a region.
pub async fn crop_type_analysis<E: EarthObservation>(
    backend: &Backend<E>,
    chain: &SourceChain,
    request: &CropRequest,
) -> Result<CropTypeReport> {
    let (region, window) = request.region.validate()?;
    let (season, effective) = determine_season(window, request.season)?;
    info!(season = season.label(), start = %effective.start, "crop type analysis");

    let provider = backend.ensure_ready().await?;
    let scene = chain.require_composite(provider, &region, &effective).await?;
    let rules = crop_rules(season);

    let aggregator = ZonalAggregator::new(provider, &scene, &region, AREA_SCALE);
    let areas = aggregator.class_areas(&rules).await?;
    let (legend, included) = build_legend(&areas);

    let layers = class_layers(provider, &scene, &rules, &included).await?;

    let builder = TimeSeriesBuilder::new(provider, chain, MEAN_SCALE);
    let series = builder
        .monthly_series(&region, effective, &[ZonalTarget::Surface(IndexKind::Ndvi)])
        .await?;

    let weather = match provider.climate(&region, &effective).await? {
        Some(sample) => summarize_weather(sample.avg_temp_c, sample.total_rain_mm),
        None => unavailable_weather(),
    };

    let named_area: f64 = areas
        .classes()
        .iter()
        .filter(|c| c.id != rules.fallback_id())
        .map(|c| c.area)
        .sum();
    let health_score = if areas.total() > 0.0 {
        round1(named_area / areas.total() * 100.0)
    } else {
        0.0
    };

    let dominant = areas.dominant().to_string();
    Ok(CropTypeReport {
        season: season.label(),
        expected_crops: season.expected_crops().to_vec(),
        crop_areas: areas
            .classes()
            .iter()
            .map(|c| CropArea {
                label: c.label,
                area_km2: round3(c.area),
            })
            .collect(),
        dominant_thresholds: crop_thresholds(&dominant),
        dominant_crop: dominant,
        total_area_km2: round3(areas.total()),
        health_score,
        legend,
        layers,
        ndvi_series: SeriesReport::from_series(&series[0]),
        weather,
    })
}

/// Growth-stage detection from NDVI bands.
#[derive(Debug, Clone, Serialize)]
pub struct GrowthStageReport {
    pub stage_areas: Vec<CropArea>,
    pub dominant_stage: String,
    pub legend: Legend,
    pub layers: BTreeMap<String, String>,
}

pub async fn growth_stage_analysis<E: EarthObservation>(
    backend: &Backend<E>,
    chain: &SourceChain,
    request: &RegionRequest,
) -> Result<GrowthStageReport> {
    let (region, window) = request.validate()?;
    let provider = backend.ensure_ready().await?;
    let scene = chain.require_composite(provider, &region, &window).await?;
    let rules = growth_stage_rules();

    let aggregator = ZonalAggregator::new(provider, &scene, &region, AREA_SCALE);
    let areas = aggregator.class_areas(&rules).await?;
    let (legend, included) = build_legend(&areas);
    let layers = class_layers(provider, &scene, &rules, &included).await?;

    Ok(GrowthStageReport {
        stage_areas: areas
            .classes()
            .iter()
            .map(|c| CropArea {
                label: c.label,
                area_km2: round3(c.area),
            })
            .collect(),
        dominant_stage: areas.dominant().to_string(),
        legend,
        layers,
    })
}

/// Yield outlook from vigor and moisture factors.
#[derive(Debug, Clone, Serialize)]
pub struct YieldReport {
    pub grade_areas: Vec<CropArea>,
    pub dominant_grade: String,
    /// Mean EVI, NDRE and NDMI over the region.
    pub factors: BTreeMap<&'static str, f64>,
    pub estimate: YieldEstimate,
    pub legend: Legend,
    pub layers: BTreeMap<String, String>,
}

pub async fn yield_analysis<E: EarthObservation>(
    backend: &Backend<E>,
    chain: &SourceChain,
    request: &RegionRequest,
) -> Result<YieldReport> {
    let (region, window) = request.validate()?;
    let provider = backend.ensure_ready().await?;
    let scene = chain.require_composite(provider, &region, &window).await?;
    let rules = yield_rules();

    let aggregator = ZonalAggregator::new(provider, &scene, &region, AREA_SCALE);
    let areas = aggregator.class_areas(&rules).await?;
    let (legend, included) = build_legend(&areas);
    let layers = class_layers(provider, &scene, &rules, &included).await?;

    let mut means = [0.0f64; 3];
    let mut factors = BTreeMap::new();
    for (slot, kind) in [IndexKind::Evi, IndexKind::Ndre, IndexKind::Ndmi]
        .into_iter()
        .enumerate()
    {
        let mean = aggregator.surface_mean(kind).await?.unwrap_or(0.0);
        means[slot] = mean;
        factors.insert(kind.name(), round3(mean));
    }
    let estimate = estimate_yield(means[0], means[1], means[2]);

    Ok(YieldReport {
        grade_areas: areas
            .classes()
            .iter()
            .map(|c| CropArea {
                label: c.label,
                area_km2: round3(c.area),
            })
            .collect(),
        dominant_grade: areas.dominant().to_string(),
        factors,
        estimate,
        legend,
        layers,
    })
}

/// Tile layers for the classes a legend kept, one color per class.
pub(crate) async fn class_layers<E: EarthObservation>(
    provider: &E,
    scene: &SceneHandle,
    rules: &RuleSet,
    included: &[agrolens_analysis::classification::ClassId],
) -> Result<BTreeMap<String, String>> {
    let mut layers = BTreeMap::new();
    for class in rules.resolve() {
        if !included.contains(&class.id) {
            continue;
        }
        let url = provider
            .visualize(
                scene,
                &ZonalTarget::Mask(class.predicate.clone()),
                &VisParams::mask(class.color),
            )
            .await?;
        layers.insert(class.label.to_string(), url);
    }
    Ok(layers)
}
