//! Handler for the most-commented leaderboard.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use moviesapp_core::date_window::DateWindow;
use moviesapp_core::ranking::{rank_by_count, Ranked};
use moviesapp_db::models::movie::MovieCommentCount;
use moviesapp_db::repositories::CommentRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /api/v1/top`. Both bounds are `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize)]
pub struct TopParams {
    pub since: Option<String>,
    pub to: Option<String>,
}

/// GET /api/v1/top
///
/// Every stored movie ranked by the number of comments created in the
/// window `(since, to]`. Ties share a rank.
pub async fn top_movies(
    State(state): State<AppState>,
    Query(params): Query<TopParams>,
) -> AppResult<Json<DataResponse<Vec<Ranked<MovieCommentCount>>>>> {
    let window = DateWindow::resolve(
        params.since.as_deref(),
        params.to.as_deref(),
        Utc::now().date_naive(),
    )?;

    let counts = CommentRepo::count_by_movie_in_window(&state.pool, window).await?;
    let ranked = rank_by_count(counts, |row| row.total_comments);

    tracing::debug!(since = %window.since, to = %window.to, movies = ranked.len(), "Leaderboard computed");
    Ok(Json(DataResponse { data: ranked }))
}
