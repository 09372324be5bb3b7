//! Ordered imagery source fallback.

use agrolens_core::{DateWindow, Region};
use serde::Serialize;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::provider::{EarthObservation, SceneHandle};

/// An image collection with an optional scene-level cloud filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSource {
    /// Backend collection id, e.g. `"COPERNICUS/S2_SR_HARMONIZED"`.
    pub collection: String,
    /// Keep only scenes with cloud cover below this percentage.
    pub max_cloud_pct: Option<f64>,
}

impl ImageSource {
    pub fn new(collection: impl Into<String>, max_cloud_pct: Option<f64>) -> Self {
        Self {
            collection: collection.into(),
            max_cloud_pct,
        }
    }
}

/// Ordered composite attempts; the first non-empty source wins.
#[derive(Debug, Clone)]
pub struct SourceChain {
    sources: Vec<ImageSource>,
}

impl SourceChain {
    pub fn new(sources: Vec<ImageSource>) -> Self {
        Self { sources }
    }

    /// The standard optical chain: Sentinel-2 under a 50% cloud filter,
    /// then Sentinel-2 unfiltered, then Landsat 8.
    pub fn optical() -> Self {
        Self::new(vec![
            ImageSource::new("COPERNICUS/S2_SR_HARMONIZED", Some(50.0)),
            ImageSource::new("COPERNICUS/S2_SR_HARMONIZED", None),
            ImageSource::new("LANDSAT/LC08/C02/T1_L2", None),
        ])
    }

    pub fn sources(&self) -> &[ImageSource] {
        &self.sources
    }

    /// First non-empty composite, `None` when every source is empty.
    pub async fn first_composite<E: EarthObservation>(
        &self,
        provider: &E,
        region: &Region,
        window: &DateWindow,
    ) -> Result<Option<SceneHandle>> {
        for source in &self.sources {
            if let Some(scene) = provider.composite(source, region, window).await? {
                return Ok(Some(scene));
            }
            debug!(
                collection = %source.collection,
                cloud = ?source.max_cloud_pct,
                start = %window.start,
                end = %window.end,
                "source empty, trying next"
            );
        }
        Ok(None)
    }

    /// Like [`Self::first_composite`] but exhaustion is an error.
    pub async fn require_composite<E: EarthObservation>(
        &self,
        provider: &E,
        region: &Region,
        window: &DateWindow,
    ) -> Result<SceneHandle> {
        self.first_composite(provider, region, window)
            .await?
            .ok_or_else(|| {
                EngineError::DataUnavailable(format!(
                    "no scenes in any source for {}..{}",
                    window.start, window.end
                ))
            })
    }
}
