// HTTP response utilities - every dashboard response must bypass caches
use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
};
use serde::Serialize;

/// Build a 200 response that browsers and proxies will not cache
pub fn uncached_response(
    content_type: &'static str,
    body: impl Into<Body>,
) -> Result<Response<Body>, StatusCode> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))
        .body(body.into())
        .map_err(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

pub fn html_response(html: String) -> Result<Response<Body>, StatusCode> {
    uncached_response("text/html; charset=utf-8", html)
}

pub fn json_response<T: Serialize>(data: &T) -> Result<Response<Body>, StatusCode> {
    let bytes = serde_json::to_vec(data).map_err(|e| {
        tracing::error!("JSON serialization error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    uncached_response("application/json", bytes)
}
