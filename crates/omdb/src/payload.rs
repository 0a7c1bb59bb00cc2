//! Provider record schema and shape validation.
//!
//! OMDb returns PascalCase keys with a few irregular names (`imdbRating`,
//! `DVD`, `Type`). `Title` and `Year` are required; the remaining descriptive
//! fields default to empty strings when the provider omits them.

use moviesapp_core::movies::parse_year;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Reasons a provider payload cannot be stored as a movie.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("payload does not match the movie schema: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("payload has a blank title")]
    BlankTitle,
}

/// A single third-party rating as the provider reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatingPayload {
    pub source: String,
    pub value: String,
}

/// A validated provider movie record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MoviePayload {
    pub title: String,
    #[serde(deserialize_with = "deserialize_year")]
    pub year: i32,
    #[serde(default)]
    pub rated: String,
    #[serde(default)]
    pub released: String,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub writer: String,
    #[serde(default)]
    pub actors: String,
    #[serde(default)]
    pub plot: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub awards: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub ratings: Vec<RatingPayload>,
    #[serde(default)]
    pub metascore: String,
    #[serde(default, rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(default, rename = "imdbVotes")]
    pub imdb_votes: String,
    #[serde(default, rename = "imdbID")]
    pub imdb_id: String,
    #[serde(default, rename = "Type")]
    pub movie_type: String,
    #[serde(default, rename = "DVD")]
    pub dvd: String,
    #[serde(default)]
    pub box_office: String,
    #[serde(default)]
    pub production: String,
    #[serde(default)]
    pub website: String,
}

impl MoviePayload {
    /// Validate a raw provider record.
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        let payload: Self = serde_json::from_value(value)?;
        if payload.title.trim().is_empty() {
            return Err(PayloadError::BlankTitle);
        }
        Ok(payload)
    }
}

/// Accept `Year` as a string (the provider's form) or a bare number.
fn deserialize_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYear {
        Number(i64),
        Text(String),
    }

    match RawYear::deserialize(deserializer)? {
        RawYear::Number(n) => i32::try_from(n)
            .ok()
            .filter(|year| *year > 0)
            .ok_or_else(|| de::Error::custom(format!("Year must be positive, got {n}"))),
        RawYear::Text(raw) => parse_year(&raw).map_err(de::Error::custom),
    }
}
