//! Comment model and DTOs.

use moviesapp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub movie_id: DbId,
    pub author: String,
    pub body: String,
    pub created_at: Timestamp,
}

/// DTO for creating a comment. `created_at` is always assigned by the store.
///
/// Built field by field from the request body so that a wrongly typed field
/// is reported alongside the others instead of failing the whole body.
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateComment {
    #[validate(length(min = 1, max = 15, message = "may not be blank or longer than 15 characters"))]
    pub author: String,

    #[validate(length(min = 1, message = "may not be blank"))]
    pub body: String,

    pub movie_id: Option<DbId>,
}

/// Query parameters for `GET /api/v1/comments`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentListParams {
    /// Only comments on this movie.
    pub movie: Option<DbId>,
    /// Only comments by this exact author.
    pub user: Option<String>,
    /// Comma-separated `movie` / `user` / `created`, `-` prefix for descending.
    pub ordering: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}
