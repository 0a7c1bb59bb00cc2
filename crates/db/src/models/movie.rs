//! Movie and rating models and DTOs.

use moviesapp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `movies` table.
///
/// Apart from `id`, `title`, `year` and `created_at`, every column is an
/// opaque string passed through from the metadata provider.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub year: i32,
    pub rated: String,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub plot: String,
    pub language: String,
    pub country: String,
    pub awards: String,
    pub poster: String,
    pub metascore: String,
    pub imdb_rating: String,
    pub imdb_votes: String,
    pub imdb_id: String,
    pub movie_type: String,
    pub dvd: String,
    pub box_office: String,
    pub production: String,
    pub website: String,
    pub created_at: Timestamp,
}

/// A row from the `ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub movie_id: DbId,
    pub source: String,
    pub value: String,
}

/// A movie together with the ratings it owns.
#[derive(Debug, Clone, Serialize)]
pub struct MovieWithRatings {
    #[serde(flatten)]
    pub movie: Movie,
    pub ratings: Vec<Rating>,
}

/// Per-movie comment count inside a leaderboard window.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieCommentCount {
    pub movie_id: DbId,
    pub title: String,
    pub total_comments: i64,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for inserting a movie and its ratings as one unit.
///
/// Built from a validated provider payload, never from client input.
#[derive(Debug, Clone, Default)]
pub struct CreateMovie {
    pub title: String,
    pub year: i32,
    pub rated: String,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub plot: String,
    pub language: String,
    pub country: String,
    pub awards: String,
    pub poster: String,
    pub metascore: String,
    pub imdb_rating: String,
    pub imdb_votes: String,
    pub imdb_id: String,
    pub movie_type: String,
    pub dvd: String,
    pub box_office: String,
    pub production: String,
    pub website: String,
    pub ratings: Vec<CreateRating>,
}

/// DTO for a rating nested inside [`CreateMovie`].
#[derive(Debug, Clone)]
pub struct CreateRating {
    pub source: String,
    pub value: String,
}

/// Body of `POST /api/v1/movies`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AcquireMovieRequest {
    #[serde(alias = "Title")]
    pub title: Option<String>,
}

/// Query parameters for `GET /api/v1/movies`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieListParams {
    /// Case-insensitive substring match on the title.
    #[serde(alias = "Title__icontains")]
    pub title: Option<String>,
    #[serde(alias = "Year")]
    pub year: Option<i32>,
    #[serde(alias = "Year__gt")]
    pub year_gt: Option<i32>,
    #[serde(alias = "Year__lte")]
    pub year_lte: Option<i32>,
    /// Case-insensitive substring match on the genre list.
    #[serde(alias = "Genre__icontains")]
    pub genre: Option<String>,
    /// Comma-separated `year` / `title`, `-` prefix for descending.
    pub ordering: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}
