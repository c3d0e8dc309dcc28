// Plain HTTP <-> gateway event conversion
// Lets the local host feed ordinary HTTP requests through the gateway handler

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderMap;
use hyper::{Method, Response};

use super::{ApiEvent, ApiResponse, RequestContext};
use crate::logger;

/// Header carrying a caller-supplied request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build a REST-style gateway event from request parts
///
/// An empty body is delivered as an absent body, the way gateways do.
pub fn event_from_parts(method: &Method, headers: &HeaderMap, body: String) -> ApiEvent {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    ApiEvent {
        http_method: Some(method.as_str().to_string()),
        request_context: Some(RequestContext {
            http: None,
            request_id,
        }),
        body: if body.is_empty() { None } else { Some(body) },
    }
}

/// Convert a gateway response into a hyper response
pub fn into_http_response(resp: ApiResponse, server_name: &str) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(resp.status_code)
        .header("Content-Type", "application/json")
        .header("Server", server_name);

    for (name, value) in &resp.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    builder
        .body(Full::new(Bytes::from(resp.body)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!(
                "Failed to build {} gateway response: {e}",
                resp.status_code
            ));
            let mut fallback = Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    #[test]
    fn test_event_from_parts() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-42"));

        let event = event_from_parts(&Method::POST, &headers, r#"{"name":"Ann"}"#.to_string());
        assert_eq!(event.method(), "POST");
        assert_eq!(event.request_id(), Some("req-42"));
        assert_eq!(event.body.as_deref(), Some(r#"{"name":"Ann"}"#));
    }

    #[test]
    fn test_event_from_parts_empty_body() {
        let event = event_from_parts(&Method::OPTIONS, &HeaderMap::new(), String::new());
        assert_eq!(event.method(), "OPTIONS");
        assert!(event.body.is_none());
        assert!(event.request_id().is_none());
    }

    #[test]
    fn test_into_http_response() {
        let resp = into_http_response(ApiResponse::error(400, "bad"), "contact-gateway");
        assert_eq!(resp.status(), 400);
        assert_eq!(resp.headers()["content-type"], "application/json");
        assert_eq!(resp.headers()["server"], "contact-gateway");
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
        assert_eq!(resp.headers()["access-control-allow-methods"], "OPTIONS,POST");
    }

    #[test]
    fn test_into_http_response_invalid_status() {
        let mut api = ApiResponse::ok(200);
        api.status_code = 42;
        let resp = into_http_response(api, "contact-gateway");
        assert_eq!(resp.status(), 500);
    }
}
