use axum::routing::get;
use axum::Router;

use crate::handlers::top;
use crate::state::AppState;

/// Routes mounted at `/top`.
///
/// ```text
/// GET    /        -> top_movies  (?since=YYYY-MM-DD&to=YYYY-MM-DD)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(top::top_movies))
}
