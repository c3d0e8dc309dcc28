//! HTTP response building module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::gateway::{adapter, ApiResponse};

/// Build health probe response
pub fn build_health_response(server_name: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/plain")
        .header("Cache-Control", "no-cache")
        .header("Server", server_name)
        .body(Full::new(Bytes::from("ok")))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            Response::new(Full::new(Bytes::from("ok")))
        })
}

/// Build a JSON `{"error":...}` response carrying the CORS header set
///
/// Used for host-level failures (unknown path, oversized body) so browsers
/// can still read the status of a cross-origin request.
pub fn build_error_response(status: u16, message: &str, server_name: &str) -> Response<Full<Bytes>> {
    adapter::into_http_response(ApiResponse::error(status, message), server_name)
}

fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response() {
        let resp = build_health_response("contact-gateway");
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "text/plain");
        assert_eq!(resp.headers()["server"], "contact-gateway");
    }

    #[test]
    fn test_error_response_has_cors() {
        let resp = build_error_response(404, "Not Found", "contact-gateway");
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
        assert_eq!(resp.headers()["content-type"], "application/json");
    }
}
