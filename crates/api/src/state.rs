use std::sync::Arc;

use moviesapp_omdb::MovieLookup;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: moviesapp_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Movie metadata provider used by `POST /movies`.
    pub lookup: Arc<dyn MovieLookup>,
}
