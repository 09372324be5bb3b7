//! Zonal aggregation over classified regions.

use agrolens_analysis::classification::{AreaResult, ClassArea, Predicate, RuleSet};
use agrolens_core::{IndexKind, Region, Statistic};
use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::error::Result;
use crate::provider::{CrossMask, EarthObservation, SceneHandle, ZonalTarget};

/// Area covered by a cross-scene mask, km².
pub async fn cross_area_km2<E: EarthObservation>(
    provider: &E,
    mask: &CrossMask,
    region: &Region,
    scale: f64,
) -> Result<Option<f64>> {
    let sum_m2 = provider.cross_mask_area(mask, region, scale).await?;
    Ok(sum_m2.map(|v| v / 1e6))
}

/// Concurrent per-class reductions in flight at once.
const CLASS_CONCURRENCY: usize = 4;

/// Reduction adapter for one composite.
///
/// Missing data comes back as `None`; callers choose the default. Only
/// transport and backend failures are errors.
pub struct ZonalAggregator<'a, E> {
    provider: &'a E,
    scene: &'a SceneHandle,
    region: &'a Region,
    /// Reduction scale in meters per pixel.
    scale: f64,
}

impl<'a, E: EarthObservation> ZonalAggregator<'a, E> {
    pub fn new(provider: &'a E, scene: &'a SceneHandle, region: &'a Region, scale: f64) -> Self {
        Self {
            provider,
            scene,
            region,
            scale,
        }
    }

    /// Area covered by a mask, km².
    pub async fn mask_area_km2(&self, mask: &Predicate) -> Result<Option<f64>> {
        let target = ZonalTarget::Mask(mask.clone());
        let sum_m2 = self
            .provider
            .zonal_statistic(self.scene, &target, self.region, Statistic::Sum, self.scale)
            .await?;
        Ok(sum_m2.map(|v| v / 1e6))
    }

    /// Mean of an index surface over the whole region.
    pub async fn surface_mean(&self, kind: IndexKind) -> Result<Option<f64>> {
        self.provider
            .zonal_statistic(
                self.scene,
                &ZonalTarget::Surface(kind),
                self.region,
                Statistic::Mean,
                self.scale,
            )
            .await
    }

    /// Mean of an index surface restricted to a mask.
    pub async fn masked_mean(&self, kind: IndexKind, mask: &Predicate) -> Result<Option<f64>> {
        let target = ZonalTarget::MaskedSurface {
            surface: kind,
            mask: mask.clone(),
        };
        self.provider
            .zonal_statistic(self.scene, &target, self.region, Statistic::Mean, self.scale)
            .await
    }

    /// Per-class areas for a rule set.
    ///
    /// The set is resolved into mutually exclusive predicates first, so
    /// overlapping rules never double-count area. Classes with no data
    /// report zero. Reductions run with bounded concurrency; results
    /// keep rule order.
    pub async fn class_areas(&self, rule_set: &RuleSet) -> Result<AreaResult> {
        let resolved = rule_set.resolve();
        debug!(rule_set = rule_set.name, classes = resolved.len(), "computing class areas");

        let areas = stream::iter(resolved.iter().map(|class| {
            let predicate = class.predicate.clone();
            async move { self.mask_area_km2(&predicate).await }
        }))
        .buffered(CLASS_CONCURRENCY)
        .collect::<Vec<_>>()
        .await;

        let mut classes = Vec::with_capacity(resolved.len());
        for (class, area) in resolved.iter().zip(areas) {
            classes.push(ClassArea {
                id: class.id,
                label: class.label,
                color: class.color,
                area: area?.unwrap_or(0.0),
            });
        }
        Ok(AreaResult::new(classes))
    }
}
