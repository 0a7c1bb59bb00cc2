//! Drives `OmdbClient` against a local stand-in for the provider.

use std::collections::HashMap;

use assert_matches::assert_matches;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use moviesapp_omdb::{LookupResult, MovieLookup, OmdbClient};
use serde_json::json;

async fn fake_omdb(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    if params.get("apikey").map(String::as_str) != Some("secret") {
        return (StatusCode::UNAUTHORIZED, Json(json!({"Response": "False"})));
    }
    if params.get("type").map(String::as_str) != Some("movie") {
        return (StatusCode::BAD_REQUEST, Json(json!({"Response": "False"})));
    }
    match params.get("t").map(String::as_str) {
        Some("Alien") => (
            StatusCode::OK,
            Json(json!({"Title": "Alien", "Year": "1979", "Response": "True"})),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({"Response": "False", "Error": "Movie not found!"})),
        ),
    }
}

async fn spawn_provider() -> String {
    let app = Router::new().route("/", get(fake_omdb));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

#[tokio::test]
async fn found_title_returns_payload() {
    let url = spawn_provider().await;
    let client = OmdbClient::new(url, "secret".into());

    let result = client.lookup("Alien").await.unwrap();
    assert_matches!(result, LookupResult::Found(body) => {
        assert_eq!(body["Title"], "Alien");
    });
}

#[tokio::test]
async fn false_response_flag_is_not_found() {
    let url = spawn_provider().await;
    let client = OmdbClient::new(url, "secret".into());

    let result = client.lookup("No Such Film").await.unwrap();
    assert_eq!(result, LookupResult::NotFound);
}

#[tokio::test]
async fn error_status_is_not_found() {
    let url = spawn_provider().await;
    let client = OmdbClient::new(url, "wrong".into());

    let result = client.lookup("Alien").await.unwrap();
    assert_eq!(result, LookupResult::NotFound);
}

#[tokio::test]
async fn unreachable_provider_is_a_request_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = OmdbClient::new(format!("http://{addr}/"), "secret".into());
    assert!(client.lookup("Alien").await.is_err());
}
