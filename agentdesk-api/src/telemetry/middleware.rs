//! Axum Middleware for HTTP Request Tracing
//!
//! Wraps every request in an `http_request` span and logs its completion
//! with status and latency.

use axum::{extract::Request, middleware::Next, response::Response};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Instant;
use tracing::{info_span, Instrument};

/// UUID pattern: 8-4-4-4-12 hex chars.
static UUID_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}").ok()
});

/// Numeric path segment, e.g. millisecond agent ids and prompt versions.
static NUMERIC_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"/\d+(/|$)").ok());

/// Prompt names are free-form; collapse the segment after `/prompts/`.
static PROMPT_NAME_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^/api/prompts/[^/]+").ok());

/// Normalize a path for span fields (replace ids with placeholders).
///
/// Keeps the `http.route` field low-cardinality.
fn normalize_path(path: &str) -> String {
    let mut result = path.to_string();

    if let Some(pattern) = PROMPT_NAME_PATTERN.as_ref() {
        result = pattern.replace(&result, "/api/prompts/{name}").into_owned();
    }
    if let Some(pattern) = UUID_PATTERN.as_ref() {
        result = pattern.replace_all(&result, "{id}").into_owned();
    }
    if let Some(pattern) = NUMERIC_PATTERN.as_ref() {
        // Run twice: adjacent numeric segments share a slash.
        for _ in 0..2 {
            result = pattern.replace_all(&result, "/{id}$1").into_owned();
        }
    }
    result
}

/// Observability middleware for Axum.
pub async fn observability_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let normalized_path = normalize_path(&path);

    let span = info_span!(
        "http_request",
        http.method = %method,
        http.target = %path,
        http.route = %normalized_path,
    );

    let response = next.run(request).instrument(span).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            route = %normalized_path,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            "Request failed"
        );
    } else {
        tracing::info!(
            method = %method,
            route = %normalized_path,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            "Request completed"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_timestamp_id() {
        assert_eq!(normalize_path("/api/agents/1718000000000"), "/api/agents/{id}");
    }

    #[test]
    fn test_normalize_path_thoughts() {
        assert_eq!(
            normalize_path("/api/agents/1718000000000/thoughts"),
            "/api/agents/{id}/thoughts"
        );
    }

    #[test]
    fn test_normalize_path_uuid() {
        assert_eq!(
            normalize_path("/api/agents/550e8400-e29b-41d4-a716-446655440000"),
            "/api/agents/{id}"
        );
    }

    #[test]
    fn test_normalize_path_prompt_version() {
        assert_eq!(
            normalize_path("/api/prompts/greeter/versions/3"),
            "/api/prompts/{name}/versions/{id}"
        );
    }

    #[test]
    fn test_normalize_path_no_ids() {
        assert_eq!(normalize_path("/api/agents"), "/api/agents");
        assert_eq!(normalize_path("/api/prompts"), "/api/prompts");
        assert_eq!(normalize_path("/health/ready"), "/health/ready");
    }
}
