//! Collaborator traits for earth observation and weather sources.
//!
//! The engine never touches pixels. Compositing, band arithmetic and
//! reduction run inside an external backend reached through
//! [`EarthObservation`]; the engine sends it symbolic descriptions of
//! what to compute.

use agrolens_analysis::classification::Predicate;
use agrolens_core::{DateWindow, IndexKind, Region, Statistic};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fallback::ImageSource;

/// Opaque handle to a composite held by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneHandle {
    /// Backend-assigned identifier.
    pub id: String,
    /// Collection the composite was built from.
    pub collection: String,
}

/// What to reduce over a region.
#[derive(Debug, Clone, PartialEq)]
pub enum ZonalTarget {
    /// A named index surface.
    Surface(IndexKind),
    /// A boolean mask; `Sum` over a mask yields covered area in m²,
    /// `Mean` the covered fraction of the region in `[0, 1]`.
    Mask(Predicate),
    /// An index surface restricted to where the mask holds.
    MaskedSurface {
        surface: IndexKind,
        mask: Predicate,
    },
}

/// A conjunction of per-scene masks, for comparisons across windows.
///
/// Holds where every `include` mask holds and no `exclude` mask does.
/// Water gained between two periods is one include (the later scene's
/// water mask) and one exclude (the earlier scene's).
#[derive(Debug, Clone, PartialEq)]
pub struct CrossMask {
    pub include: Vec<(SceneHandle, Predicate)>,
    pub exclude: Vec<(SceneHandle, Predicate)>,
}

impl CrossMask {
    pub fn include(scene: SceneHandle, mask: Predicate) -> Self {
        Self {
            include: vec![(scene, mask)],
            exclude: Vec::new(),
        }
    }

    pub fn and(mut self, scene: SceneHandle, mask: Predicate) -> Self {
        self.include.push((scene, mask));
        self
    }

    pub fn and_not(mut self, scene: SceneHandle, mask: Predicate) -> Self {
        self.exclude.push((scene, mask));
        self
    }
}

/// Mean temperature and total rainfall over a region and window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClimateSample {
    pub avg_temp_c: f64,
    pub total_rain_mm: f64,
}

/// Visualization parameters for tile rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisParams {
    pub min: f64,
    pub max: f64,
    pub palette: Vec<&'static str>,
}

impl VisParams {
    /// Single-color mask rendering.
    pub fn mask(color: &'static str) -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            palette: vec![color],
        }
    }
}

/// Earth-observation backend: compositing, reduction and rendering.
///
/// `composite` returns `Ok(None)` when the collection has no scenes for
/// the region and window; that is data absence, not failure.
pub trait EarthObservation: Send + Sync {
    /// Cheap liveness check, run once per process by [`crate::Backend`].
    fn ping(&self) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Build a median composite for a source, region and window.
    fn composite(
        &self,
        source: &ImageSource,
        region: &Region,
        window: &DateWindow,
    ) -> impl std::future::Future<Output = Result<Option<SceneHandle>>> + Send;

    /// Reduce a target over the region at the given scale (m/px).
    ///
    /// `Ok(None)` when the reduction is empty (target masked everywhere).
    fn zonal_statistic(
        &self,
        scene: &SceneHandle,
        target: &ZonalTarget,
        region: &Region,
        stat: Statistic,
        scale: f64,
    ) -> impl std::future::Future<Output = Result<Option<f64>>> + Send;

    /// Area in m² where a cross-scene mask conjunction holds.
    ///
    /// `Ok(None)` when no scene carries data over the region.
    fn cross_mask_area(
        &self,
        mask: &CrossMask,
        region: &Region,
        scale: f64,
    ) -> impl std::future::Future<Output = Result<Option<f64>>> + Send;

    /// Render a cross-scene mask as a tile-layer URL template.
    fn visualize_cross(
        &self,
        mask: &CrossMask,
        vis: &VisParams,
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Reanalysis climate summary for a region and window.
    ///
    /// `Ok(None)` when the climate collection has no coverage.
    fn climate(
        &self,
        region: &Region,
        window: &DateWindow,
    ) -> impl std::future::Future<Output = Result<Option<ClimateSample>>> + Send;

    /// Render a target as a tile-layer URL template.
    fn visualize(
        &self,
        scene: &SceneHandle,
        target: &ZonalTarget,
        vis: &VisParams,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// One day of a short-range weather forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// `"YYYY-MM-DD"`.
    pub date: String,
    /// Total rainfall, mm.
    pub rainfall: f64,
    /// Mean temperature, Celsius.
    pub temp: f64,
    /// Mean relative humidity, percent.
    pub humidity: f64,
    /// Mean wind speed, m/s.
    pub wind_speed: f64,
    /// Most frequent condition over the day.
    pub description: String,
}

/// Weather data source: short-range forecast plus daily history.
pub trait WeatherProvider: Send + Sync {
    /// Up to 7 daily records starting today.
    fn forecast(
        &self,
        lat: f64,
        lon: f64,
    ) -> impl std::future::Future<Output = Result<Vec<DailyForecast>>> + Send;

    /// Daily precipitation (mm) over a window, ascending by date.
    fn historical_daily(
        &self,
        lat: f64,
        lon: f64,
        window: &DateWindow,
    ) -> impl std::future::Future<Output = Result<Vec<(NaiveDate, f64)>>> + Send;
}
