//! Repository for the `movies` and `ratings` tables.

use std::collections::HashMap;

use moviesapp_core::movies::{parse_movie_ordering, MovieSortField};
use moviesapp_core::ordering::SortKey;
use moviesapp_core::pagination::PageRequest;
use moviesapp_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::{CreateMovie, Movie, MovieListParams, MovieWithRatings, Rating};

/// Column list for `movies` queries.
const COLUMNS: &str = "\
    id, title, year, rated, released, runtime, genre, director, writer, actors, \
    plot, language, country, awards, poster, metascore, imdb_rating, imdb_votes, \
    imdb_id, movie_type, dvd, box_office, production, website, created_at";

/// Column list for `ratings` queries.
const RATING_COLUMNS: &str = "id, movie_id, source, value";

/// Unique constraint guarding the title dedup key.
pub const TITLE_CONSTRAINT: &str = "uq_movies_title";

/// Provides create and query operations for movies and their ratings.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a movie and all of its ratings in a single transaction.
    ///
    /// Either every row is written or none is.
    pub async fn create_with_ratings(
        pool: &PgPool,
        input: &CreateMovie,
    ) -> Result<MovieWithRatings, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO movies \
                (title, year, rated, released, runtime, genre, director, writer, actors, \
                 plot, language, country, awards, poster, metascore, imdb_rating, imdb_votes, \
                 imdb_id, movie_type, dvd, box_office, production, website) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, \
                     $16, $17, $18, $19, $20, $21, $22, $23) \
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&insert_query)
            .bind(&input.title)
            .bind(input.year)
            .bind(&input.rated)
            .bind(&input.released)
            .bind(&input.runtime)
            .bind(&input.genre)
            .bind(&input.director)
            .bind(&input.writer)
            .bind(&input.actors)
            .bind(&input.plot)
            .bind(&input.language)
            .bind(&input.country)
            .bind(&input.awards)
            .bind(&input.poster)
            .bind(&input.metascore)
            .bind(&input.imdb_rating)
            .bind(&input.imdb_votes)
            .bind(&input.imdb_id)
            .bind(&input.movie_type)
            .bind(&input.dvd)
            .bind(&input.box_office)
            .bind(&input.production)
            .bind(&input.website)
            .fetch_one(&mut *tx)
            .await?;

        let rating_query = format!(
            "INSERT INTO ratings (movie_id, source, value) \
             VALUES ($1, $2, $3) \
             RETURNING {RATING_COLUMNS}"
        );
        let mut ratings = Vec::with_capacity(input.ratings.len());
        for rating in &input.ratings {
            let row = sqlx::query_as::<_, Rating>(&rating_query)
                .bind(movie.id)
                .bind(&rating.source)
                .bind(&rating.value)
                .fetch_one(&mut *tx)
                .await?;
            ratings.push(row);
        }

        tx.commit().await?;
        Ok(MovieWithRatings { movie, ratings })
    }

    /// Whether a movie with exactly this title is already stored.
    pub async fn exists_by_title(pool: &PgPool, title: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM movies WHERE title = $1)")
            .bind(title)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a movie by ID, enriched with its ratings.
    pub async fn find_by_id_with_ratings(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MovieWithRatings>, sqlx::Error> {
        let Some(movie) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let ratings = Self::ratings_for_movies(pool, &[movie.id]).await?;
        Ok(Some(MovieWithRatings { movie, ratings }))
    }

    /// List one page of movies matching the filters, each with its ratings.
    pub async fn list_with_ratings(
        pool: &PgPool,
        params: &MovieListParams,
        page: PageRequest,
    ) -> Result<Vec<MovieWithRatings>, sqlx::Error> {
        let movies = Self::list(pool, params, page).await?;
        let ids: Vec<DbId> = movies.iter().map(|m| m.id).collect();

        let mut by_movie: HashMap<DbId, Vec<Rating>> = HashMap::new();
        for rating in Self::ratings_for_movies(pool, &ids).await? {
            by_movie.entry(rating.movie_id).or_default().push(rating);
        }

        Ok(movies
            .into_iter()
            .map(|movie| {
                let ratings = by_movie.remove(&movie.id).unwrap_or_default();
                MovieWithRatings { movie, ratings }
            })
            .collect())
    }

    /// List one page of movies matching the filters.
    pub async fn list(
        pool: &PgPool,
        params: &MovieListParams,
        page: PageRequest,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_movie_filter(params);
        let order_clause = order_clause(&parse_movie_ordering(params.ordering.as_deref()));

        let query = format!(
            "SELECT {COLUMNS} FROM movies {where_clause} \
             ORDER BY {order_clause} \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let q = bind_movie_values(sqlx::query_as::<_, Movie>(&query), &bind_values);
        q.bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Count movies matching the filters (for pagination metadata).
    pub async fn count(pool: &PgPool, params: &MovieListParams) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_movie_filter(params);
        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM movies {where_clause}");

        let q = bind_movie_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// All ratings belonging to any of `movie_ids`, in insertion order.
    pub async fn ratings_for_movies(
        pool: &PgPool,
        movie_ids: &[DbId],
    ) -> Result<Vec<Rating>, sqlx::Error> {
        if movie_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {RATING_COLUMNS} FROM ratings \
             WHERE movie_id = ANY($1) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(movie_ids)
            .fetch_all(pool)
            .await
    }
}

/// Whether `err` is a unique violation on the movie title constraint.
pub fn is_duplicate_title(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(TITLE_CONSTRAINT)
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built movie list queries.
enum BindValue {
    Int(i32),
    Text(String),
}

/// Build a WHERE clause and bind values from `MovieListParams`.
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
fn build_movie_filter(params: &MovieListParams) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(title) = params.title.as_deref().filter(|t| !t.is_empty()) {
        conditions.push(format!("title ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(contains_pattern(title)));
    }

    if let Some(year) = params.year {
        conditions.push(format!("year = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Int(year));
    }

    if let Some(year_gt) = params.year_gt {
        conditions.push(format!("year > ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Int(year_gt));
    }

    if let Some(year_lte) = params.year_lte {
        conditions.push(format!("year <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Int(year_lte));
    }

    if let Some(genre) = params.genre.as_deref().filter(|g| !g.is_empty()) {
        conditions.push(format!("genre ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(contains_pattern(genre)));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Render sort keys as an ORDER BY list; `id` always breaks ties.
fn order_clause(keys: &[SortKey<MovieSortField>]) -> String {
    let mut terms: Vec<String> = keys
        .iter()
        .map(|key| {
            let column = match key.field {
                MovieSortField::Year => "year",
                MovieSortField::Title => "title",
            };
            let direction = if key.descending { "DESC" } else { "ASC" };
            format!("{column} {direction}")
        })
        .collect();
    terms.push("id ASC".to_string());
    terms.join(", ")
}

/// `%needle%` with LIKE metacharacters in `needle` escaped.
fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_movie_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Int(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_movie_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Int(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
        }
    }
    q
}
