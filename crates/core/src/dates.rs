//! Date windows and month iteration
//!
//! Time-series assembly walks calendar months: the cursor starts on the
//! first day of the start month and each window's end is the last day of
//! that month, clipped to the overall range end.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{Error, Result};

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Build a validated window; `start` must not be after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse from `"YYYY-MM-DD"` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Number of whole days spanned, inclusive.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Parse a `"YYYY-MM-DD"` date string.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| Error::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// One calendar month of a larger range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    /// Label in `"YYYY-MM"` form.
    pub label: String,
    /// First day of the month (or the range start's month).
    pub start: NaiveDate,
    /// Last day of the month, clipped to the range end.
    pub end: NaiveDate,
}

impl MonthWindow {
    /// The month's bounds as a [`DateWindow`].
    pub fn window(&self) -> DateWindow {
        DateWindow {
            start: self.start,
            end: self.end,
        }
    }
}

/// Iterator over the calendar months spanned by a [`DateWindow`].
///
/// Yields one [`MonthWindow`] per month from the start's month through the
/// month containing the range end, inclusive. The final window is
/// truncated when the range ends mid-month.
pub struct MonthWindows {
    cursor: NaiveDate,
    end: NaiveDate,
    done: bool,
}

impl MonthWindows {
    pub fn new(window: DateWindow) -> Self {
        let cursor = window.start.with_day(1).expect("day 1 always valid");
        Self {
            cursor,
            end: window.end,
            done: false,
        }
    }
}

impl Iterator for MonthWindows {
    type Item = MonthWindow;

    fn next(&mut self) -> Option<MonthWindow> {
        if self.done || self.cursor > self.end {
            return None;
        }

        let month_end = last_day_of_month(self.cursor).min(self.end);
        let item = MonthWindow {
            label: format!("{:04}-{:02}", self.cursor.year(), self.cursor.month()),
            start: self.cursor,
            end: month_end,
        };

        match self.cursor.checked_add_months(Months::new(1)) {
            Some(next) => self.cursor = next,
            None => self.done = true,
        }

        Some(item)
    }
}

/// Last day of the month containing `date`.
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).expect("day 1 always valid");
    first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .expect("month arithmetic in range")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn rejects_reversed_range() {
        assert!(DateWindow::parse("2024-02-01", "2024-01-01").is_err());
    }

    #[test]
    fn month_ends() {
        assert_eq!(last_day_of_month(d("2024-02-10")), d("2024-02-29"));
        assert_eq!(last_day_of_month(d("2023-02-10")), d("2023-02-28"));
        assert_eq!(last_day_of_month(d("2024-12-01")), d("2024-12-31"));
    }

    #[test]
    fn windows_clip_final_month() {
        let window = DateWindow::parse("2024-01-15", "2024-03-10").unwrap();
        let months: Vec<_> = MonthWindows::new(window).collect();

        assert_eq!(months.len(), 3);
        assert_eq!(
            months.iter().map(|m| m.label.as_str()).collect::<Vec<_>>(),
            vec!["2024-01", "2024-02", "2024-03"]
        );
        assert_eq!(months[0].start, d("2024-01-01"));
        assert_eq!(months[0].end, d("2024-01-31"));
        assert_eq!(months[2].start, d("2024-03-01"));
        assert_eq!(months[2].end, d("2024-03-10"));
    }

    #[test]
    fn single_month_window() {
        let window = DateWindow::parse("2024-06-05", "2024-06-20").unwrap();
        let months: Vec<_> = MonthWindows::new(window).collect();
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].label, "2024-06");
        assert_eq!(months[0].end, d("2024-06-20"));
    }

    #[test]
    fn spans_year_boundary() {
        let window = DateWindow::parse("2023-11-01", "2024-02-15").unwrap();
        let labels: Vec<_> = MonthWindows::new(window).map(|m| m.label).collect();
        assert_eq!(labels, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
    }
}
