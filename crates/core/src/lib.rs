//! # AgroLens Core
//!
//! Shared types and errors for the AgroLens land/water analysis engine.
//!
//! This crate provides:
//! - `Region`: immutable polygon/multipolygon region of interest
//! - `DateWindow` / `MonthWindows`: calendar-month iteration over a range
//! - `IndexKind` / `Statistic`: index-surface names and zonal statistics
//! - `TimeSeries`: ordered monthly series with missing values
//! - `Season`: Kharif/Rabi cropping-season resolution
//! - `Error`: typed failure taxonomy shared by all crates

pub mod dates;
pub mod error;
pub mod index;
pub mod region;
pub mod season;
pub mod series;

pub use dates::{last_day_of_month, parse_date, DateWindow, MonthWindow, MonthWindows};
pub use error::{Error, Result};
pub use index::{IndexKind, Statistic};
pub use region::Region;
pub use season::{determine_season, Season, SeasonType};
pub use series::{TimeSeries, TimeSeriesPoint, YearlyValue};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::dates::{DateWindow, MonthWindow, MonthWindows};
    pub use crate::error::{Error, Result};
    pub use crate::index::{IndexKind, Statistic};
    pub use crate::region::Region;
    pub use crate::season::{Season, SeasonType};
    pub use crate::series::{TimeSeries, TimeSeriesPoint, YearlyValue};
}
