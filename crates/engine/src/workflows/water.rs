//! Surface-water workflows: change, seasonal, quality and ensemble.

use std::collections::BTreeMap;

use agrolens_analysis::assess::{
    assess_quality, drought_risk, drought_severity, percent_change, project_water_area,
    water_stress, water_type, QualityAssessment, WaterProjection,
};
use agrolens_analysis::classification::{
    ai_water_mask, ensemble_water_mask, water_detectors, water_mask,
};
use agrolens_core::{DateWindow, IndexKind, Region};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::backend::Backend;
use crate::error::Result;
use crate::fallback::SourceChain;
use crate::provider::{CrossMask, EarthObservation, SceneHandle, VisParams, ZonalTarget};
use crate::timeseries::TimeSeriesBuilder;
use crate::workflows::crop::SeriesReport;
use crate::workflows::{round1, round3, ChangeRequest, RegionRequest, AREA_SCALE, MEAN_SCALE};
use crate::zonal::{cross_area_km2, ZonalAggregator};

const WATER_COLOR: &str = "#0000FF";
const GAIN_COLOR: &str = "#00FF00";
const LOSS_COLOR: &str = "#FF0000";

// ---------------------------------------------------------------------------
// Water change between two periods
// ---------------------------------------------------------------------------

/// Water extent change between two periods.
#[derive(Debug, Clone, Serialize)]
pub struct WaterChangeReport {
    pub area_period1_km2: f64,
    pub area_period2_km2: f64,
    pub change_km2: f64,
    /// Guarded percent change, 0 on a zero baseline.
    pub change_percent: f64,
    pub gain_km2: f64,
    pub loss_km2: f64,
    pub layers: BTreeMap<String, String>,
    pub ndwi_series: SeriesReport,
    pub mndwi_series: SeriesReport,
}

pub async fn water_change<E: EarthObservation>(
    backend: &Backend<E>,
    chain: &SourceChain,
    request: &ChangeRequest,
) -> Result<WaterChangeReport> {
    let (region, window1, window2) = request.validate()?;
    info!(start = %window1.start, end = %window2.end, "water change analysis");

    let provider = backend.ensure_ready().await?;
    let scene1 = chain.require_composite(provider, &region, &window1).await?;
    let scene2 = chain.require_composite(provider, &region, &window2).await?;
    let mask = water_mask();

    let agg1 = ZonalAggregator::new(provider, &scene1, &region, AREA_SCALE);
    let agg2 = ZonalAggregator::new(provider, &scene2, &region, AREA_SCALE);
    let area1 = agg1.mask_area_km2(&mask).await?.unwrap_or(0.0);
    let area2 = agg2.mask_area_km2(&mask).await?.unwrap_or(0.0);

    let gain = CrossMask::include(scene2.clone(), mask.clone())
        .and_not(scene1.clone(), mask.clone());
    let loss = CrossMask::include(scene1.clone(), mask.clone())
        .and_not(scene2.clone(), mask.clone());
    let gain_km2 = cross_area_km2(provider, &gain, &region, AREA_SCALE)
        .await?
        .unwrap_or(0.0);
    let loss_km2 = cross_area_km2(provider, &loss, &region, AREA_SCALE)
        .await?
        .unwrap_or(0.0);

    let mut layers = BTreeMap::new();
    for (label, scene) in [("period1", &scene1), ("period2", &scene2)] {
        let url = provider
            .visualize(
                scene,
                &ZonalTarget::Mask(mask.clone()),
                &VisParams::mask(WATER_COLOR),
            )
            .await?;
        layers.insert(label.to_string(), url);
    }
    layers.insert(
        "gain".to_string(),
        provider.visualize_cross(&gain, &VisParams::mask(GAIN_COLOR)).await?,
    );
    layers.insert(
        "loss".to_string(),
        provider.visualize_cross(&loss, &VisParams::mask(LOSS_COLOR)).await?,
    );

    let (ndwi_series, mndwi_series) =
        water_index_series(provider, chain, &region, DateWindow::new(window1.start, window2.end)?)
            .await?;

    Ok(WaterChangeReport {
        area_period1_km2: round3(area1),
        area_period2_km2: round3(area2),
        change_km2: round3(area2 - area1),
        change_percent: round1(percent_change(area1, area2)),
        gain_km2: round3(gain_km2),
        loss_km2: round3(loss_km2),
        layers,
        ndwi_series,
        mndwi_series,
    })
}

// ---------------------------------------------------------------------------
// Seasonal water
// ---------------------------------------------------------------------------

/// Monsoon-cycle water accounting for one year.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonalWaterReport {
    pub pre_monsoon_km2: f64,
    pub monsoon_km2: f64,
    pub post_monsoon_km2: f64,
    pub permanent_km2: f64,
    pub seasonal_km2: f64,
    pub drought_severity: &'static str,
    pub water_stress: &'static str,
    pub layers: BTreeMap<String, String>,
    pub ndwi_series: SeriesReport,
    pub mndwi_series: SeriesReport,
}

pub async fn seasonal_water<E: EarthObservation>(
    backend: &Backend<E>,
    chain: &SourceChain,
    request: &RegionRequest,
) -> Result<SeasonalWaterReport> {
    let (region, range) = request.validate()?;
    let year = range.start.year();
    info!(year, "seasonal water analysis");

    // India monsoon pattern: pre (Mar-May), monsoon (Jun-Sep),
    // post (Oct-Dec).
    let pre_window = DateWindow::parse(&format!("{year}-03-01"), &format!("{year}-05-31"))?;
    let monsoon_window = DateWindow::parse(&format!("{year}-06-01"), &format!("{year}-09-30"))?;
    let post_window = DateWindow::parse(&format!("{year}-10-01"), &format!("{year}-12-31"))?;

    let provider = backend.ensure_ready().await?;
    let mask = water_mask();
    let mut scenes: Vec<SceneHandle> = Vec::with_capacity(3);
    let mut areas = [0.0_f64; 3];
    for (i, window) in [pre_window, monsoon_window, post_window].iter().enumerate() {
        let scene = chain.require_composite(provider, &region, window).await?;
        let agg = ZonalAggregator::new(provider, &scene, &region, AREA_SCALE);
        areas[i] = agg.mask_area_km2(&mask).await?.unwrap_or(0.0);
        scenes.push(scene);
    }
    let [pre_km2, monsoon_km2, post_km2] = areas;

    // Water present through all three seasons.
    let permanent = CrossMask::include(scenes[0].clone(), mask.clone())
        .and(scenes[1].clone(), mask.clone())
        .and(scenes[2].clone(), mask.clone());
    let permanent_km2 = cross_area_km2(provider, &permanent, &region, AREA_SCALE)
        .await?
        .unwrap_or(0.0);
    // Monsoon water that does not persist year-round.
    let seasonal_km2 = (monsoon_km2 - permanent_km2).max(0.0);

    let mut layers = BTreeMap::new();
    for (label, scene) in [
        ("pre_monsoon", &scenes[0]),
        ("monsoon", &scenes[1]),
        ("post_monsoon", &scenes[2]),
    ] {
        let url = provider
            .visualize(
                scene,
                &ZonalTarget::Mask(mask.clone()),
                &VisParams::mask(WATER_COLOR),
            )
            .await?;
        layers.insert(label.to_string(), url);
    }
    layers.insert(
        "permanent".to_string(),
        provider.visualize_cross(&permanent, &VisParams::mask("#000080")).await?,
    );

    let (ndwi_series, mndwi_series) = water_index_series(provider, chain, &region, range).await?;

    Ok(SeasonalWaterReport {
        pre_monsoon_km2: round3(pre_km2),
        monsoon_km2: round3(monsoon_km2),
        post_monsoon_km2: round3(post_km2),
        permanent_km2: round3(permanent_km2),
        seasonal_km2: round3(seasonal_km2),
        drought_severity: drought_severity(monsoon_km2, post_km2),
        water_stress: water_stress(permanent_km2, monsoon_km2),
        layers,
        ndwi_series,
        mndwi_series,
    })
}

// ---------------------------------------------------------------------------
// Water quality
// ---------------------------------------------------------------------------

/// Spectral water-quality report over detected water.
#[derive(Debug, Clone, Serialize)]
pub struct WaterQualityReport {
    pub assessment: QualityAssessment,
    /// Ratio name -> mean over detected water.
    pub means: BTreeMap<&'static str, f64>,
    pub layers: BTreeMap<String, String>,
}

pub async fn water_quality<E: EarthObservation>(
    backend: &Backend<E>,
    chain: &SourceChain,
    request: &RegionRequest,
) -> Result<WaterQualityReport> {
    let (region, window) = request.validate()?;
    info!(start = %window.start, "water quality analysis");

    let provider = backend.ensure_ready().await?;
    let scene = chain.require_composite(provider, &region, &window).await?;
    let mask = water_mask();
    let aggregator = ZonalAggregator::new(provider, &scene, &region, MEAN_SCALE);

    let kinds = [
        IndexKind::Ndti,
        IndexKind::Cdom,
        IndexKind::Wri,
        IndexKind::Chlorophyll,
        IndexKind::Turbidity,
    ];
    let mut means = BTreeMap::new();
    for kind in kinds {
        let mean = aggregator.masked_mean(kind, &mask).await?.unwrap_or(0.0);
        means.insert(kind.name(), round3(mean));
    }

    let quality_vis = VisParams {
        min: -0.2,
        max: 2.0,
        palette: vec!["#0000FF", "#00FFFF", "#FFFF00", "#FF0000"],
    };
    let mut layers = BTreeMap::new();
    for kind in kinds {
        let url = provider
            .visualize(&scene, &ZonalTarget::Surface(kind), &quality_vis)
            .await?;
        layers.insert(kind.name().to_string(), url);
    }

    Ok(WaterQualityReport {
        assessment: assess_quality(
            means[IndexKind::Ndti.name()],
            means[IndexKind::Cdom.name()],
            means[IndexKind::Wri.name()],
            means[IndexKind::Chlorophyll.name()],
        ),
        means,
        layers,
    })
}

// ---------------------------------------------------------------------------
// Ensemble water detection
// ---------------------------------------------------------------------------

/// Multi-detector water report with short-horizon projections.
#[derive(Debug, Clone, Serialize)]
pub struct AdvancedWaterReport {
    /// Area where at least 3 of 4 detectors agree, km².
    pub ensemble_km2: f64,
    /// Area seen by the probability detector alone, km². The projection
    /// trend compares the ensemble against this baseline.
    pub ai_detector_km2: f64,
    /// Mean detector agreement over the region, percent.
    pub ensemble_confidence: f64,
    pub water_type: &'static str,
    pub index_means: BTreeMap<&'static str, f64>,
    pub projection: WaterProjection,
    pub drought_risk: &'static str,
    pub layers: BTreeMap<String, String>,
}

pub async fn advanced_water<E: EarthObservation>(
    backend: &Backend<E>,
    chain: &SourceChain,
    request: &RegionRequest,
) -> Result<AdvancedWaterReport> {
    let (region, window) = request.validate()?;
    info!(start = %window.start, "ensemble water analysis");

    let provider = backend.ensure_ready().await?;
    let scene = chain.require_composite(provider, &region, &window).await?;
    let area_agg = ZonalAggregator::new(provider, &scene, &region, AREA_SCALE);
    let mean_agg = ZonalAggregator::new(provider, &scene, &region, MEAN_SCALE);

    let ensemble = ensemble_water_mask();
    let ensemble_km2 = area_agg.mask_area_km2(&ensemble).await?.unwrap_or(0.0);
    let ai_detector_km2 = area_agg.mask_area_km2(&ai_water_mask()).await?.unwrap_or(0.0);

    // Agreement: mean coverage of each detector, 25% per method.
    let mut agreement = 0.0;
    let mut layers = BTreeMap::new();
    for (name, color, detector) in water_detectors() {
        let coverage = provider
            .zonal_statistic(
                &scene,
                &ZonalTarget::Mask(detector.clone()),
                &region,
                agrolens_core::Statistic::Mean,
                MEAN_SCALE,
            )
            .await?
            .unwrap_or(0.0);
        agreement += coverage * 25.0;
        let url = provider
            .visualize(&scene, &ZonalTarget::Mask(detector), &VisParams::mask(color))
            .await?;
        layers.insert(name.to_string(), url);
    }
    layers.insert(
        "ensemble".to_string(),
        provider
            .visualize(&scene, &ZonalTarget::Mask(ensemble), &VisParams::mask(WATER_COLOR))
            .await?,
    );

    let mut index_means = BTreeMap::new();
    for kind in [IndexKind::Ndwi, IndexKind::Mndwi, IndexKind::Awei] {
        let mean = mean_agg.surface_mean(kind).await?.unwrap_or(0.0);
        index_means.insert(kind.name(), round3(mean));
    }

    let projection = project_water_area(ensemble_km2, ai_detector_km2);
    Ok(AdvancedWaterReport {
        ensemble_km2: round3(ensemble_km2),
        ai_detector_km2: round3(ai_detector_km2),
        ensemble_confidence: round1(agreement),
        water_type: water_type(
            index_means[IndexKind::Ndwi.name()],
            index_means[IndexKind::Mndwi.name()],
            index_means[IndexKind::Awei.name()],
        ),
        index_means,
        drought_risk: drought_risk(ensemble_km2, projection.trend),
        projection,
        layers,
    })
}

// ---------------------------------------------------------------------------
// Shared series helper
// ---------------------------------------------------------------------------

/// NDWI and MNDWI monthly means over detected water, gaps filled.
async fn water_index_series<E: EarthObservation>(
    provider: &E,
    chain: &SourceChain,
    region: &Region,
    range: DateWindow,
) -> Result<(SeriesReport, SeriesReport)> {
    let mask = water_mask();
    let targets = [
        ZonalTarget::MaskedSurface {
            surface: IndexKind::Ndwi,
            mask: mask.clone(),
        },
        ZonalTarget::MaskedSurface {
            surface: IndexKind::Mndwi,
            mask,
        },
    ];
    let builder = TimeSeriesBuilder::new(provider, chain, MEAN_SCALE);
    let series = builder.monthly_series(region, range, &targets).await?;
    Ok((
        SeriesReport::from_series(&series[0]),
        SeriesReport::from_series(&series[1]),
    ))
}
