//! Handlers for the `/movies` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use moviesapp_core::error::CoreError;
use moviesapp_core::movies::{duplicate_message, require_title, NOT_FOUND_UPSTREAM_MESSAGE};
use moviesapp_core::pagination::{Page, PageRequest, MOVIES_PAGE_SIZE};
use moviesapp_core::types::DbId;
use moviesapp_db::models::movie::{AcquireMovieRequest, MovieListParams, MovieWithRatings};
use moviesapp_db::repositories::MovieRepo;
use serde_json::json;

use crate::acquisition::{acquire_movie, AcquireOutcome};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/movies
///
/// Filters: `title`, `genre` (substring, case-insensitive), `year`,
/// `year_gt`, `year_lte`. Ordered by `ordering`, default id.
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<MovieListParams>,
) -> AppResult<Json<DataResponse<Page<MovieWithRatings>>>> {
    let page = PageRequest::new(params.page, params.page_size, MOVIES_PAGE_SIZE);
    let count = MovieRepo::count(&state.pool, &params).await?;
    let results = MovieRepo::list_with_ratings(&state.pool, &params, page).await?;
    Ok(Json(DataResponse {
        data: Page::new(page, count, results),
    }))
}

/// GET /api/v1/movies/{id}
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MovieWithRatings>>> {
    let movie = MovieRepo::find_by_id_with_ratings(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id,
        }))?;
    Ok(Json(DataResponse { data: movie }))
}

/// POST /api/v1/movies
///
/// Fetch a movie from the metadata provider by title and store it.
///
/// - 201 with the stored movie when it was new.
/// - 204 with a `warning` when the title is already stored.
/// - 204 with an `error` when the provider has no such title.
///
/// A missing, non-JSON, or wrongly typed body counts as a missing title.
pub async fn create_movie(
    State(state): State<AppState>,
    input: Result<Json<AcquireMovieRequest>, JsonRejection>,
) -> AppResult<Response> {
    let requested = match input {
        Ok(Json(body)) => body.title,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Unreadable acquisition body");
            None
        }
    };
    let title = require_title(requested.as_deref())?;

    let response = match acquire_movie(&state.pool, state.lookup.as_ref(), title).await? {
        AcquireOutcome::Created(movie) => {
            (StatusCode::CREATED, Json(DataResponse { data: movie })).into_response()
        }
        AcquireOutcome::Duplicate { title } => (
            StatusCode::NO_CONTENT,
            Json(json!({ "warning": duplicate_message(&title) })),
        )
            .into_response(),
        AcquireOutcome::NotFound => (
            StatusCode::NO_CONTENT,
            Json(json!({ "error": NOT_FOUND_UPSTREAM_MESSAGE })),
        )
            .into_response(),
    };
    Ok(response)
}
