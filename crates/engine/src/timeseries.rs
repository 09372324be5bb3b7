//! Monthly time-series construction.

use agrolens_core::{DateWindow, MonthWindows, Region, Statistic, TimeSeries, TimeSeriesPoint};
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::error::Result;
use crate::fallback::SourceChain;
use crate::provider::{EarthObservation, ZonalTarget};

/// Concurrent month requests in flight at once.
const MONTH_CONCURRENCY: usize = 4;

/// Builds one series per target over the calendar months of a range.
///
/// Each month gets one composite through the fallback chain; every
/// requested target is reduced against that composite. A month whose
/// composite or reduction fails degrades to a missing point for all
/// targets, never to a request failure.
pub struct TimeSeriesBuilder<'a, E> {
    provider: &'a E,
    chain: &'a SourceChain,
    scale: f64,
}

impl<'a, E: EarthObservation> TimeSeriesBuilder<'a, E> {
    pub fn new(provider: &'a E, chain: &'a SourceChain, scale: f64) -> Self {
        Self {
            provider,
            chain,
            scale,
        }
    }

    /// One ordered series per target, aligned on month labels.
    pub async fn monthly_series(
        &self,
        region: &Region,
        range: DateWindow,
        targets: &[ZonalTarget],
    ) -> Result<Vec<TimeSeries>> {
        let windows: Vec<_> = MonthWindows::new(range).collect();
        debug!(months = windows.len(), targets = targets.len(), "building monthly series");

        // Bounded fan-out, order preserved by `buffered`.
        let monthly: Vec<(String, Vec<Option<f64>>)> = stream::iter(windows.into_iter().map(
            |month| async move {
                let values = self.month_values(region, &month.window(), targets).await;
                (month.label, values)
            },
        ))
        .buffered(MONTH_CONCURRENCY)
        .collect()
        .await;

        let mut series = Vec::with_capacity(targets.len());
        for i in 0..targets.len() {
            let points = monthly
                .iter()
                .map(|(label, values)| TimeSeriesPoint {
                    month: label.clone(),
                    value: values[i],
                })
                .collect();
            series.push(TimeSeries::new(points));
        }
        Ok(series)
    }

    /// All target values for one month; any failure yields all-missing.
    async fn month_values(
        &self,
        region: &Region,
        window: &DateWindow,
        targets: &[ZonalTarget],
    ) -> Vec<Option<f64>> {
        let scene = match self.chain.first_composite(self.provider, region, window).await {
            Ok(Some(scene)) => scene,
            Ok(None) => return vec![None; targets.len()],
            Err(e) => {
                warn!(start = %window.start, error = %e, "month composite failed");
                return vec![None; targets.len()];
            }
        };

        let mut values = Vec::with_capacity(targets.len());
        for target in targets {
            let value = self
                .provider
                .zonal_statistic(&scene, target, region, Statistic::Mean, self.scale)
                .await;
            match value {
                Ok(v) => values.push(v.map(round3)),
                Err(e) => {
                    warn!(start = %window.start, error = %e, "month reduction failed");
                    return vec![None; targets.len()];
                }
            }
        }
        values
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
