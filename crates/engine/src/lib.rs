//! # AgroLens Engine
//!
//! Async orchestration layer: talks to an earth-observation backend and
//! weather APIs through the collaborator traits in [`provider`], and
//! assembles the classification, time-series and forecasting logic from
//! `agrolens-analysis` into whole-region reports.
//!
//! ## Modules
//!
//! - **provider**: the external seams (`EarthObservation`, `WeatherProvider`)
//! - **backend**: one-time liveness-checked provider access
//! - **fallback**: ordered imagery source chain
//! - **zonal**: per-class area and mean reductions
//! - **timeseries**: bounded-concurrency monthly series
//! - **weather**: OpenWeatherMap and NASA POWER clients
//! - **workflows**: crop, farm, water and weather reports

pub mod backend;
pub mod error;
pub mod fallback;
pub mod http;
pub mod provider;
pub mod timeseries;
pub mod weather;
pub mod workflows;
pub mod zonal;

pub use backend::Backend;
pub use error::{EngineError, Result};
pub use fallback::{ImageSource, SourceChain};
pub use provider::{
    ClimateSample, CrossMask, DailyForecast, EarthObservation, SceneHandle, VisParams,
    WeatherProvider, ZonalTarget,
};
pub use timeseries::TimeSeriesBuilder;
pub use zonal::ZonalAggregator;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::backend::Backend;
    pub use crate::error::{EngineError, Result};
    pub use crate::fallback::{ImageSource, SourceChain};
    pub use crate::provider::{
        ClimateSample, CrossMask, DailyForecast, EarthObservation, SceneHandle, VisParams,
        WeatherProvider, ZonalTarget,
    };
    pub use crate::timeseries::TimeSeriesBuilder;
    pub use crate::workflows::ApiResponse;
    pub use crate::zonal::ZonalAggregator;
    pub use agrolens_analysis::prelude::*;
}
