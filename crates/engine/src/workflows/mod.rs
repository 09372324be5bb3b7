//! Analysis workflows.
//!
//! Each workflow validates its request, orchestrates the backend and
//! weather collaborators and returns a serializable report. Per-unit
//! data absence (an empty month, a zero-area class) degrades inside the
//! report; only request-level failures return `Err`.

pub mod crop;
pub mod farm;
pub mod water;
pub mod weather;

use agrolens_core::{DateWindow, Region};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, Result};

/// Reduction scale for area sums, m/px.
pub const AREA_SCALE: f64 = 30.0;

/// Reduction scale for surface means, m/px.
pub const MEAN_SCALE: f64 = 100.0;

/// Response envelope rendered at the boundary.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Collapse a workflow result into the envelope.
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Region of interest plus one date window, the common request core.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionRequest {
    pub roi: Value,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
}

impl RegionRequest {
    /// Parse and validate the region and window.
    pub fn validate(&self) -> Result<(Region, DateWindow)> {
        let region = Region::from_geojson(&self.roi)?;
        let window = DateWindow::parse(&self.start_date, &self.end_date)?;
        Ok((region, window))
    }
}

/// Two date windows over one region, for change analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRequest {
    pub roi: Value,
    #[serde(rename = "period1Start")]
    pub period1_start: String,
    #[serde(rename = "period1End")]
    pub period1_end: String,
    #[serde(rename = "period2Start")]
    pub period2_start: String,
    #[serde(rename = "period2End")]
    pub period2_end: String,
}

impl ChangeRequest {
    pub fn validate(&self) -> Result<(Region, DateWindow, DateWindow)> {
        let region = Region::from_geojson(&self.roi)?;
        let window1 = DateWindow::parse(&self.period1_start, &self.period1_end)?;
        let window2 = DateWindow::parse(&self.period2_start, &self.period2_end)?;
        if window2.start < window1.start {
            return Err(EngineError::Core(agrolens_core::Error::InvalidInput(
                "second period must not start before the first".into(),
            )));
        }
        Ok((region, window1, window2))
    }
}

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub(crate) fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
