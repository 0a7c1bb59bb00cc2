#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use moviesapp_api::config::ServerConfig;
use moviesapp_api::router::build_app_router;
use moviesapp_api::state::AppState;
use moviesapp_omdb::{LookupResult, MovieLookup, OmdbError};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        omdb_url: "http://omdb.invalid/".to_string(),
        omdb_api_key: "test-key".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Fake metadata provider
// ---------------------------------------------------------------------------

/// In-memory stand-in for OMDb, keyed by lowercased title.
#[derive(Default)]
pub struct FakeLookup {
    records: HashMap<String, Value>,
    calls: AtomicUsize,
}

impl FakeLookup {
    pub fn with_record(mut self, query: &str, record: Value) -> Self {
        self.records.insert(query.to_lowercase(), record);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MovieLookup for FakeLookup {
    async fn lookup(&self, title: &str) -> Result<LookupResult, OmdbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match self.records.get(&title.to_lowercase()) {
            Some(record) => LookupResult::Found(record.clone()),
            None => LookupResult::NotFound,
        })
    }
}

pub fn alien_record() -> Value {
    json!({
        "Title": "Alien",
        "Year": "1979",
        "Rated": "R",
        "Genre": "Horror, Sci-Fi",
        "Director": "Ridley Scott",
        "Ratings": [
            {"Source": "Internet Movie Database", "Value": "8.5/10"},
            {"Source": "Rotten Tomatoes", "Value": "98%"}
        ],
        "imdbID": "tt0078748",
        "Type": "movie",
        "Response": "True"
    })
}

pub fn heat_record() -> Value {
    json!({
        "Title": "Heat",
        "Year": "1995",
        "Genre": "Action, Crime, Drama",
        "Director": "Michael Mann",
        "Ratings": [{"Source": "Metacritic", "Value": "76/100"}],
        "Response": "True"
    })
}

/// A record whose `Year` is not a single positive integer.
pub fn broken_record() -> Value {
    json!({
        "Title": "Broken",
        "Year": "N/A",
        "Ratings": [{"Source": "Metacritic", "Value": "1/100"}],
        "Response": "True"
    })
}

/// The provider every API test talks to unless it needs its own.
pub fn default_lookup() -> FakeLookup {
    FakeLookup::default()
        .with_record("Alien", alien_record())
        .with_record("Heat", heat_record())
        .with_record("Broken", broken_record())
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router over `pool` with the default fake provider.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Arc::new(default_lookup()))
}

/// Build the full application router with a caller-supplied provider.
pub fn build_test_app_with(pool: PgPool, lookup: Arc<dyn MovieLookup>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        lookup,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST `body` as-is, with `content_type` only when one is given.
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
