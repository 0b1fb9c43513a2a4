//! Request ID generation and request spans

use axum::http::Request;
use tracing::Span;
use uuid::Uuid;

/// Generate a new request ID using UUID v4
///
/// # Examples
///
/// ```
/// use colorapp::logging::generate_request_id;
///
/// let request_id = generate_request_id();
/// assert!(!request_id.is_empty());
/// ```
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span factory for `TraceLayer::make_span_with`.
///
/// Every request gets its own span carrying the service segment name
/// (`<stage>-gateway`, `<stage>-colorteller-<color>`) and a fresh request ID.
pub fn request_span<B>(segment: String) -> impl Fn(&Request<B>) -> Span + Clone {
    move |request: &Request<B>| {
        tracing::info_span!(
            "request",
            segment = %segment,
            request_id = %generate_request_id(),
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}
