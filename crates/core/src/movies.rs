//! Movie acquisition rules, messages, and list ordering.

use crate::error::CoreError;
use crate::ordering::{parse_ordering, SortKey};

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const MISSING_TITLE_MESSAGE: &str = "Please provide movie title in POST request.";

pub const NOT_FOUND_UPSTREAM_MESSAGE: &str = "Movie with that title has not been found.";

pub const PAYLOAD_SHAPE_MESSAGE: &str = "Problem with serializing data from OMDb.";

/// Warning returned when a movie with `title` is already stored.
pub fn duplicate_message(title: &str) -> String {
    format!("{title} already exists in database.")
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Return the requested title, or a validation error if it is absent or blank.
pub fn require_title(title: Option<&str>) -> Result<&str, CoreError> {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(CoreError::Validation(MISSING_TITLE_MESSAGE.to_string())),
    }
}

/// Parse the provider's `Year` value into a positive integer.
///
/// Ranges such as `2019–2022` (series) are rejected.
pub fn parse_year(raw: &str) -> Result<i32, String> {
    let year: i32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("Year must be a whole number, got '{raw}'"))?;
    if year <= 0 {
        return Err(format!("Year must be positive, got {year}"));
    }
    Ok(year)
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Fields the movie list may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieSortField {
    Year,
    Title,
}

impl MovieSortField {
    pub fn from_param(name: &str) -> Option<Self> {
        match name {
            "year" | "Year" => Some(Self::Year),
            "title" | "Title" => Some(Self::Title),
            _ => None,
        }
    }
}

/// Parse `?ordering=` for the movie list. Empty means primary-key order.
pub fn parse_movie_ordering(raw: Option<&str>) -> Vec<SortKey<MovieSortField>> {
    parse_ordering(raw, MovieSortField::from_param)
}
