//! Cropping season resolution
//!
//! Indian cropping calendar: Kharif (monsoon, June-October) and Rabi
//! (winter, November-April). A forced season override also rewrites the
//! analysis window to the canonical season bounds.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dates::DateWindow;
use crate::error::Result;

/// Requested season handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonType {
    /// Infer the season from the start month.
    #[default]
    Auto,
    Kharif,
    Rabi,
}

/// Resolved cropping season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Season {
    Kharif,
    Rabi,
    /// Start month falls in May: between seasons.
    Transition,
}

impl Season {
    pub fn label(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Transition => "Transition",
        }
    }

    /// Crops expected in this season, in reporting order.
    pub fn expected_crops(&self) -> &'static [&'static str] {
        match self {
            Season::Kharif => &["Rice", "Sugarcane", "Cotton", "Maize"],
            Season::Rabi => &["Wheat", "Barley", "Mustard", "Gram"],
            Season::Transition => &["Mixed Crops"],
        }
    }
}

/// Resolve the season and the effective analysis window.
///
/// Forced Kharif clips the window to June-October of the start year;
/// forced Rabi to November through April of the following year. In auto
/// mode the window is kept and the season inferred from the start month.
pub fn determine_season(window: DateWindow, kind: SeasonType) -> Result<(Season, DateWindow)> {
    let year = window.start.year();
    match kind {
        SeasonType::Kharif => {
            let window = DateWindow::new(
                NaiveDate::from_ymd_opt(year, 6, 1).expect("valid date"),
                NaiveDate::from_ymd_opt(window.end.year(), 10, 31).expect("valid date"),
            )?;
            Ok((Season::Kharif, window))
        }
        SeasonType::Rabi => {
            let window = DateWindow::new(
                NaiveDate::from_ymd_opt(year, 11, 1).expect("valid date"),
                NaiveDate::from_ymd_opt(year + 1, 4, 30).expect("valid date"),
            )?;
            Ok((Season::Rabi, window))
        }
        SeasonType::Auto => {
            let season = match window.start.month() {
                6..=10 => Season::Kharif,
                11 | 12 | 1..=4 => Season::Rabi,
                _ => Season::Transition,
            };
            Ok((season, window))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: &str, end: &str) -> DateWindow {
        DateWindow::parse(start, end).unwrap()
    }

    #[test]
    fn auto_detects_kharif() {
        let (season, w) = determine_season(window("2024-07-01", "2024-09-30"), SeasonType::Auto).unwrap();
        assert_eq!(season, Season::Kharif);
        assert_eq!(w, window("2024-07-01", "2024-09-30"));
    }

    #[test]
    fn auto_detects_rabi_winter_months() {
        let (season, _) = determine_season(window("2024-12-01", "2025-02-28"), SeasonType::Auto).unwrap();
        assert_eq!(season, Season::Rabi);
        let (season, _) = determine_season(window("2024-02-01", "2024-03-31"), SeasonType::Auto).unwrap();
        assert_eq!(season, Season::Rabi);
    }

    #[test]
    fn auto_may_is_transition() {
        let (season, _) = determine_season(window("2024-05-01", "2024-05-31"), SeasonType::Auto).unwrap();
        assert_eq!(season, Season::Transition);
        assert_eq!(season.expected_crops(), &["Mixed Crops"]);
    }

    #[test]
    fn forced_rabi_rewrites_window() {
        let (season, w) = determine_season(window("2024-01-10", "2024-02-20"), SeasonType::Rabi).unwrap();
        assert_eq!(season, Season::Rabi);
        assert_eq!(w, window("2024-11-01", "2025-04-30"));
    }

    #[test]
    fn forced_kharif_rewrites_window() {
        let (_, w) = determine_season(window("2024-01-10", "2024-02-20"), SeasonType::Kharif).unwrap();
        assert_eq!(w, window("2024-06-01", "2024-10-31"));
    }
}
