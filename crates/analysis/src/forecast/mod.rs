//! Trend fitting and rainfall projection.

pub mod confidence;
pub mod rainfall;
pub mod trend;

pub use confidence::confidence_score;
pub use rainfall::{
    monthly_projection, MonthlyProjection, RainfallPredictor, ThirtyDayOutlook,
    DEFAULT_ANNUAL_PROJECTION, DEFAULT_MONTHLY_PROJECTION,
};
pub use trend::{fit_trend, Trend, TrendModel, MIN_POINTS_FOR_MEAN, MIN_POINTS_FOR_REGRESSION};
