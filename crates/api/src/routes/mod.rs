pub mod comments;
pub mod health;
pub mod movies;
pub mod top;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                     index links (GET)
///
/// /movies               list, acquire by title (GET, POST)
/// /movies/{id}          movie detail with ratings (GET)
///
/// /comments             list, create (GET, POST)
/// /comments/{id}        comment detail (GET)
///
/// /top                  most-commented leaderboard (GET, ?since=&to=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index::index))
        .nest("/movies", movies::router())
        .nest("/comments", comments::router())
        .nest("/top", top::router())
}
