//! Creation-date window used to restrict which QR codes are counted.
//!
//! An absent window means "all time" and is expressed as
//! `Option<DateWindow>::None` rather than a sentinel value.

use crate::domain::entities::QrCode;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use thiserror::Error;

/// Input accepted in place of a calendar date to mean "no bound".
pub const ALL_TIME: &str = "all time";

/// Calendar date format accepted for window bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("invalid date '{0}', expected YYYY-MM-DD or 'all time'")]
    InvalidDate(String),

    #[error("window start {start} is after window end {end}")]
    Inverted {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Inclusive `[start, end]` range of creation times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateWindow {
    /// # Errors
    ///
    /// Returns [`WindowError::Inverted`] if `start` is after `end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds a window from calendar dates.
    ///
    /// Both bounds sit at midnight, so `end` covers only the first instant of
    /// its day.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        Self::new(start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
    }

    /// Parses user input for both bounds.
    ///
    /// Returns `Ok(None)` when either bound is [`ALL_TIME`]: a half-open
    /// window disables filtering altogether.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidDate`] for input that is neither a
    /// `YYYY-MM-DD` date nor [`ALL_TIME`], and [`WindowError::Inverted`] when
    /// the start date is after the end date.
    pub fn parse(start: &str, end: &str) -> Result<Option<Self>, WindowError> {
        match (parse_bound(start)?, parse_bound(end)?) {
            (Some(start), Some(end)) => Self::from_dates(start, end).map(Some),
            _ => Ok(None),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    /// Codes whose creation time could not be parsed are always included.
    pub fn includes(&self, code: &QrCode) -> bool {
        code.created_at.is_none_or(|at| self.contains(at))
    }
}

/// Inclusion decision for an optional window.
pub fn include(code: &QrCode, window: Option<&DateWindow>) -> bool {
    window.is_none_or(|window| window.includes(code))
}

/// Parses one bound, `None` meaning [`ALL_TIME`].
pub fn parse_bound(input: &str) -> Result<Option<NaiveDate>, WindowError> {
    let input = input.trim();
    if input.eq_ignore_ascii_case(ALL_TIME) {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map(Some)
        .map_err(|_| WindowError::InvalidDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ScanCount;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn code(created_at: Option<NaiveDateTime>) -> QrCode {
        QrCode {
            id: "1".to_string(),
            created: "raw".to_string(),
            created_at,
            title: "t".to_string(),
            short_url: String::new(),
            target_url: None,
            type_name: "URL".to_string(),
            is_dynamic: false,
            total_scans: ScanCount::Count(0),
            unique_scans: ScanCount::Count(0),
        }
    }

    fn august() -> DateWindow {
        DateWindow::parse("2023-08-01", "2023-08-31").unwrap().unwrap()
    }

    #[test]
    fn test_no_window_includes_everything() {
        assert!(include(&code(Some(at("1999-01-01 00:00:00"))), None));
        assert!(include(&code(None), None));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let window = august();
        assert!(window.includes(&code(Some(window.start()))));
        assert!(window.includes(&code(Some(window.end()))));
        assert!(!window.includes(&code(Some(at("2023-07-31 23:59:59")))));
        assert!(!window.includes(&code(Some(at("2023-08-31 00:00:01")))));
    }

    #[test]
    fn test_inside_window() {
        let window = august();
        assert!(include(&code(Some(at("2023-08-11 13:13:29"))), Some(&window)));
    }

    #[test]
    fn test_unparsed_date_bypasses_window() {
        let window = august();
        assert!(include(&code(None), Some(&window)));
    }

    #[test]
    fn test_parse_all_time() {
        assert_eq!(DateWindow::parse("all time", "all time").unwrap(), None);
        assert_eq!(DateWindow::parse("2023-08-01", "All Time").unwrap(), None);
        assert_eq!(DateWindow::parse(" all time ", "2023-08-01").unwrap(), None);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            DateWindow::parse("08/01/2023", "2023-08-31"),
            Err(WindowError::InvalidDate("08/01/2023".to_string()))
        );
        assert!(matches!(
            DateWindow::parse("2023-09-01", "2023-08-01"),
            Err(WindowError::Inverted { .. })
        ));
    }

    #[test]
    fn test_single_day_window() {
        let window = DateWindow::parse("2023-08-11", "2023-08-11").unwrap().unwrap();
        assert_eq!(window.start(), window.end());
        assert!(window.contains(at("2023-08-11 00:00:00")));
    }
}
