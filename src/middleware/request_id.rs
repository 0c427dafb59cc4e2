use axum::{
    body::Body,
    http::{HeaderName, Request},
};

/// HTTP header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// Tracing span for one HTTP request, tagged with its request ID
pub fn make_span_with_request_id(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_name() {
        assert_eq!(request_id_header().as_str(), REQUEST_ID_HEADER);
    }

    #[test]
    fn test_span_is_built_without_request_id() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let _span = make_span_with_request_id(&request);
    }
}
