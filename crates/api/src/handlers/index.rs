//! Handler for the API root.

use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::response::DataResponse;

/// Absolute links to the top-level collections.
#[derive(Debug, Serialize)]
pub struct IndexLinks {
    pub movies: String,
    pub comments: String,
    pub top: String,
}

/// GET /api/v1
pub async fn index(headers: HeaderMap) -> Json<DataResponse<IndexLinks>> {
    let base = base_url(&headers);
    Json(DataResponse {
        data: IndexLinks {
            movies: format!("{base}/api/v1/movies"),
            comments: format!("{base}/api/v1/comments"),
            top: format!("{base}/api/v1/top"),
        },
    })
}

/// Scheme and authority the client used, honouring `x-forwarded-proto`.
fn base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    format!("{scheme}://{host}")
}
