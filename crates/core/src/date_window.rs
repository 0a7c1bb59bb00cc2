//! Leaderboard date window parsing.
//!
//! A window is the half-open range `(since, to]` of calendar dates. A comment
//! counts toward the leaderboard when its UTC creation date falls inside it.

use chrono::{Datelike, NaiveDate};

use crate::error::CoreError;

/// `strptime`-style format accepted for `since` / `to` query values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lower bound used when `since` is absent. No comment predates it.
pub fn default_since() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// A resolved leaderboard window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Exclusive lower bound.
    pub since: NaiveDate,
    /// Inclusive upper bound.
    pub to: NaiveDate,
}

impl DateWindow {
    /// Resolve raw query values into a window.
    ///
    /// Absent or empty values fall back to [`default_since`] and `today`.
    /// `since` later than `to` is accepted and simply matches nothing.
    pub fn resolve(
        since: Option<&str>,
        to: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, CoreError> {
        let since = match since.filter(|s| !s.is_empty()) {
            Some(raw) => parse_date(raw)?,
            None => default_since(),
        };
        let to = match to.filter(|s| !s.is_empty()) {
            Some(raw) => parse_date(raw)?,
            None => today,
        };
        Ok(Self { since, to })
    }
}

/// Parse a single `YYYY-MM-DD` value, echoing the raw input on failure.
///
/// chrono's `%Y` also takes signs, padding spaces and years beyond four
/// digits, so the shape is checked byte by byte first. Year zero is rejected.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let invalid = || {
        CoreError::Validation(format!(
            "Incorrect date format - {raw}, please enter a date in format YYYY-M-D (e.g 2015-04-23)"
        ))
    };

    if !has_date_shape(raw) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .filter(|date| date.year() >= 1)
        .ok_or_else(invalid)
}

/// Exactly ten ASCII bytes: four digits, `-`, two digits, `-`, two digits.
fn has_date_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
