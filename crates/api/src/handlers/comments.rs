//! Handlers for the `/comments` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use moviesapp_core::error::CoreError;
use moviesapp_core::pagination::{Page, PageRequest, COMMENTS_PAGE_SIZE};
use moviesapp_core::types::DbId;
use moviesapp_core::validation::{field_errors, invalid_fields, FieldError};
use moviesapp_db::models::comment::{Comment, CommentListParams, CreateComment};
use moviesapp_db::repositories::{CommentRepo, MovieRepo};
use serde_json::{Map, Value};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/comments
///
/// Filters: `movie` (id), `user` (exact author). Ordered by `ordering`,
/// default creation time then author.
pub async fn list_comments(
    State(state): State<AppState>,
    Query(params): Query<CommentListParams>,
) -> AppResult<Json<DataResponse<Page<Comment>>>> {
    let page = PageRequest::new(params.page, params.page_size, COMMENTS_PAGE_SIZE);
    let count = CommentRepo::count(&state.pool, &params).await?;
    let results = CommentRepo::list(&state.pool, &params, page).await?;
    Ok(Json(DataResponse {
        data: Page::new(page, count, results),
    }))
}

/// GET /api/v1/comments/{id}
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Comment>>> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    Ok(Json(DataResponse { data: comment }))
}

/// POST /api/v1/comments
///
/// Rejects the request with every failing field listed when the author or
/// body is blank or not a string, the author is too long, or the movie id is
/// missing, malformed, or unknown. A body that is not a JSON object is a
/// plain 400.
pub async fn create_comment(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    let Json(body) = body?;
    let Value::Object(fields) = body else {
        return Err(AppError::BadRequest("Expected a JSON object".to_string()));
    };

    let (input, mut errors) = read_comment(&fields);

    if let Err(e) = input.validate() {
        errors.extend(field_errors(&e));
    }

    let movie_id = match input.movie_id {
        Some(id) if MovieRepo::find_by_id(&state.pool, id).await?.is_some() => Some(id),
        Some(id) => {
            errors.push(FieldError::new("movie", format!("no movie with id {id}")));
            None
        }
        None => None,
    };

    let movie_id = match movie_id {
        Some(id) if errors.is_empty() => id,
        _ => {
            errors.sort_by(|a, b| a.field.cmp(&b.field));
            return Err(invalid_fields(&errors).into());
        }
    };

    let comment = CommentRepo::create(&state.pool, movie_id, &input.author, &input.body).await?;
    tracing::info!(comment_id = comment.id, movie_id, author = %comment.author, "Comment created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// Pull the comment fields out of a JSON object, trimming text fields.
///
/// `user`, `comment` and `movie` are accepted as aliases. Type errors come
/// back as field errors; a missing movie id is reported here too.
fn read_comment(fields: &Map<String, Value>) -> (CreateComment, Vec<FieldError>) {
    let mut errors = Vec::new();

    let mut text = |name: &str, alias: &str| match field(fields, name, alias) {
        None => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(_) => {
            errors.push(FieldError::new(name, "must be a string"));
            String::new()
        }
    };
    let author = text("author", "user");
    let body = text("body", "comment");

    let movie_id = match field(fields, "movie_id", "movie") {
        None => {
            errors.push(FieldError::new("movie", "this field is required"));
            None
        }
        Some(value) => {
            let id = match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<DbId>().ok(),
                _ => None,
            };
            if id.is_none() {
                errors.push(FieldError::new("movie", "invalid movie id"));
            }
            id
        }
    };

    (
        CreateComment {
            author,
            body,
            movie_id,
        },
        errors,
    )
}

/// Look up `name`, falling back to `alias`. JSON `null` counts as absent.
fn field<'a>(fields: &'a Map<String, Value>, name: &str, alias: &str) -> Option<&'a Value> {
    fields
        .get(name)
        .or_else(|| fields.get(alias))
        .filter(|value| !value.is_null())
}
