//! CORS policy for the dashboard origins
//!
//! Origins are compared exactly, except that a `*` in a pattern matches one or
//! more characters within the host (so `https://*.vercel.app` admits preview
//! deployments but not `https://vercel.app`).

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// True when `origin` is admitted by `pattern`
pub fn origin_matches(pattern: &str, origin: &str) -> bool {
    let pattern = pattern.trim_end_matches('/');
    let origin = origin.trim_end_matches('/');

    match pattern.split_once('*') {
        None => pattern.eq_ignore_ascii_case(origin),
        Some((prefix, suffix)) => {
            if origin.len() <= prefix.len() + suffix.len() {
                return false;
            }
            let (head, rest) = origin.split_at(prefix.len());
            let Some(middle) = rest.strip_suffix(suffix) else {
                return false;
            };
            head.eq_ignore_ascii_case(prefix)
                && !middle.is_empty()
                && !middle.contains('/')
                && !middle.contains(':')
        }
    }
}

/// Credentialed CORS layer admitting the configured origins
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let patterns: Vec<String> = allowed_origins.to_vec();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|o| patterns.iter().any(|p| origin_matches(p, o)))
                .unwrap_or(false)
        }))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
