//! Repository for the `comments` table.

use moviesapp_core::comments::{parse_comment_ordering, CommentSortField};
use moviesapp_core::date_window::DateWindow;
use moviesapp_core::ordering::SortKey;
use moviesapp_core::pagination::PageRequest;
use moviesapp_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentListParams};
use crate::models::movie::MovieCommentCount;

/// Column list for `comments` queries.
const COLUMNS: &str = "id, movie_id, author, body, created_at";

/// Provides create and query operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment on `movie_id`. The creation time is set by the database.
    pub async fn create(
        pool: &PgPool,
        movie_id: DbId,
        author: &str,
        body: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (movie_id, author, body) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(movie_id)
            .bind(author)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of comments matching the filters.
    pub async fn list(
        pool: &PgPool,
        params: &CommentListParams,
        page: PageRequest,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_comment_filter(params);
        let order_clause = order_clause(&parse_comment_ordering(params.ordering.as_deref()));

        let query = format!(
            "SELECT {COLUMNS} FROM comments {where_clause} \
             ORDER BY {order_clause} \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, Comment>(&query);
        for val in &bind_values {
            q = match val {
                BindValue::BigInt(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
            };
        }
        q.bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Count comments matching the filters (for pagination metadata).
    pub async fn count(pool: &PgPool, params: &CommentListParams) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_comment_filter(params);
        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM comments {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for val in &bind_values {
            q = match val {
                BindValue::BigInt(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
            };
        }
        q.fetch_one(pool).await
    }

    /// Comment count per movie for comments whose UTC creation date falls in
    /// `(window.since, window.to]`.
    ///
    /// Every stored movie is returned, with a count of zero when it has no
    /// qualifying comments. Rows come back by count descending, then id.
    pub async fn count_by_movie_in_window(
        pool: &PgPool,
        window: DateWindow,
    ) -> Result<Vec<MovieCommentCount>, sqlx::Error> {
        sqlx::query_as::<_, MovieCommentCount>(
            "SELECT m.id AS movie_id, m.title, COUNT(c.id)::BIGINT AS total_comments \
             FROM movies m \
             LEFT JOIN comments c \
                ON c.movie_id = m.id \
               AND (c.created_at AT TIME ZONE 'UTC')::date > $1 \
               AND (c.created_at AT TIME ZONE 'UTC')::date <= $2 \
             GROUP BY m.id, m.title \
             ORDER BY total_comments DESC, m.id ASC",
        )
        .bind(window.since)
        .bind(window.to)
        .fetch_all(pool)
        .await
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built comment list queries.
enum BindValue {
    BigInt(i64),
    Text(String),
}

/// Build a WHERE clause and bind values from `CommentListParams`.
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
fn build_comment_filter(params: &CommentListParams) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(movie_id) = params.movie {
        conditions.push(format!("movie_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(movie_id));
    }

    if let Some(ref user) = params.user {
        conditions.push(format!("author = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(user.clone()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Render sort keys as an ORDER BY list; `id` always breaks ties.
fn order_clause(keys: &[SortKey<CommentSortField>]) -> String {
    let mut terms: Vec<String> = keys
        .iter()
        .map(|key| {
            let column = match key.field {
                CommentSortField::Movie => "movie_id",
                CommentSortField::User => "author",
                CommentSortField::Created => "created_at",
            };
            let direction = if key.descending { "DESC" } else { "ASC" };
            format!("{column} {direction}")
        })
        .collect();
    terms.push("id ASC".to_string());
    terms.join(", ")
}
