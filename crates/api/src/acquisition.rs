//! Movie acquisition: look a title up with the metadata provider and store
//! it unless a movie with the same canonical title already exists.

use moviesapp_db::models::movie::{CreateMovie, CreateRating, MovieWithRatings};
use moviesapp_db::repositories::movie_repo::is_duplicate_title;
use moviesapp_db::repositories::MovieRepo;
use moviesapp_db::DbPool;
use moviesapp_omdb::{LookupResult, MovieLookup, MoviePayload};

use crate::error::{AppError, AppResult};

/// Result of a successful acquisition attempt.
#[derive(Debug)]
pub enum AcquireOutcome {
    /// A new movie and its ratings were stored.
    Created(MovieWithRatings),
    /// A movie with the provider's title is already stored. Nothing was written.
    Duplicate { title: String },
    /// The provider has no movie with that title.
    NotFound,
}

/// Look up `title` and store the result.
///
/// Deduplication uses the provider's canonical title, so `alien` and `Alien`
/// resolve to the same stored movie. A concurrent insert of the same title
/// trips the `uq_movies_title` constraint and is reported as a duplicate.
pub async fn acquire_movie(
    pool: &DbPool,
    lookup: &dyn MovieLookup,
    title: &str,
) -> AppResult<AcquireOutcome> {
    let LookupResult::Found(raw) = lookup.lookup(title).await? else {
        tracing::info!(title, "Title not found by metadata provider");
        return Ok(AcquireOutcome::NotFound);
    };

    let payload =
        MoviePayload::from_value(raw).map_err(|e| AppError::UpstreamPayload(e.to_string()))?;

    if MovieRepo::exists_by_title(pool, &payload.title).await? {
        tracing::info!(title = %payload.title, "Movie already stored, skipping");
        return Ok(AcquireOutcome::Duplicate {
            title: payload.title,
        });
    }

    let canonical_title = payload.title.clone();
    match MovieRepo::create_with_ratings(pool, &create_movie_from(payload)).await {
        Ok(movie) => {
            tracing::info!(movie_id = movie.movie.id, title = %canonical_title, "Movie acquired");
            Ok(AcquireOutcome::Created(movie))
        }
        Err(err) if is_duplicate_title(&err) => {
            tracing::info!(title = %canonical_title, "Movie stored concurrently, skipping");
            Ok(AcquireOutcome::Duplicate {
                title: canonical_title,
            })
        }
        Err(err) => Err(err.into()),
    }
}

/// Map a validated provider record onto the insert DTO.
fn create_movie_from(payload: MoviePayload) -> CreateMovie {
    CreateMovie {
        title: payload.title,
        year: payload.year,
        rated: payload.rated,
        released: payload.released,
        runtime: payload.runtime,
        genre: payload.genre,
        director: payload.director,
        writer: payload.writer,
        actors: payload.actors,
        plot: payload.plot,
        language: payload.language,
        country: payload.country,
        awards: payload.awards,
        poster: payload.poster,
        metascore: payload.metascore,
        imdb_rating: payload.imdb_rating,
        imdb_votes: payload.imdb_votes,
        imdb_id: payload.imdb_id,
        movie_type: payload.movie_type,
        dvd: payload.dvd,
        box_office: payload.box_office,
        production: payload.production,
        website: payload.website,
        ratings: payload
            .ratings
            .into_iter()
            .map(|r| CreateRating {
                source: r.source,
                value: r.value,
            })
            .collect(),
    }
}
