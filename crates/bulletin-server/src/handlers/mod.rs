//! HTTP handlers

pub mod events;
pub mod health;
pub mod sos;

pub use health::health;

use axum::http::{header, HeaderMap};
use serde::de::DeserializeOwned;

/// Decode a POST body without ever rejecting the request.
///
/// Only bodies sent as JSON are read. An empty, non-JSON or unparseable body
/// yields the default request, so every field is stored as NULL.
pub(crate) fn lenient_body<T>(headers: &HeaderMap, body: &[u8]) -> T
where
    T: DeserializeOwned + Default,
{
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false);

    if !is_json || body.iter().all(u8::is_ascii_whitespace) {
        return T::default();
    }

    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!("Ignoring unparseable request body: {}", e);
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use bulletin_types::CreateEventRequest;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        headers
    }

    #[test]
    fn test_json_body_is_decoded() {
        let req: CreateEventRequest = lenient_body(&json_headers(), br#"{"eventType": "x"}"#);
        assert_eq!(req.event_type.as_deref(), Some("x"));
    }

    #[test]
    fn test_missing_content_type_ignores_body() {
        let req: CreateEventRequest = lenient_body(&HeaderMap::new(), br#"{"eventType": "x"}"#);
        assert!(req.event_type.is_none());
    }

    #[test]
    fn test_empty_or_broken_body_is_default() {
        let empty: CreateEventRequest = lenient_body(&json_headers(), b"");
        assert!(empty.event_type.is_none());

        let broken: CreateEventRequest = lenient_body(&json_headers(), b"{not json");
        assert!(broken.event_type.is_none());
        assert!(broken.description.is_none());
    }
}
