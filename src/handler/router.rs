//! Request routing dispatch module
//!
//! Entry point for HTTP request processing on the local host.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::http::request::Parts;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::contact;
use crate::gateway::adapter::{self, REQUEST_ID_HEADER};
use crate::http::{self, BodyError};
use crate::logger::{self, AccessLogEntry};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    remote_addr: SocketAddr,
    config: Arc<Config>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();

    let response = route_request(&parts, body, &config).await;

    if config.logging.access_log {
        log_access(&parts, &response, remote_addr, started, &config);
    }

    Ok(response)
}

async fn route_request<B>(parts: &Parts, body: B, config: &Config) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let path = parts.uri.path();
    let server_name = config.http.server_name.as_str();

    // 1. Health probes
    if config.routes.health.is_probe(path) {
        return http::build_health_response(server_name);
    }

    // 2. Anything but the submit path
    if path != config.routes.submit_path {
        return http::build_error_response(404, "Not Found", server_name);
    }

    // 3. Collect body within the configured limit
    let bytes = match http::collect_limited(&parts.headers, body, config.http.max_body_size).await
    {
        Ok(bytes) => bytes,
        Err(BodyError::TooLarge) => {
            logger::log_warning(&format!(
                "Request body too large (max: {} bytes)",
                config.http.max_body_size
            ));
            return http::build_error_response(413, "Payload Too Large", server_name);
        }
        Err(BodyError::Read(e)) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            return http::build_error_response(400, "Bad Request", server_name);
        }
    };

    let Ok(body) = String::from_utf8(bytes.to_vec()) else {
        logger::log_warning("Request body is not valid UTF-8");
        return http::build_error_response(400, "Bad Request", server_name);
    };

    // 4. Hand over to the contact handler as a gateway event
    let event = adapter::event_from_parts(&parts.method, &parts.headers, body);
    adapter::into_http_response(contact::handle(&event), server_name)
}

fn log_access(
    parts: &Parts,
    response: &Response<Full<Bytes>>,
    remote_addr: SocketAddr,
    started: Instant,
    config: &Config,
) {
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = format!("{:?}", parts.version)
        .trim_start_matches("HTTP/")
        .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
        .unwrap_or(usize::MAX);
    entry.request_id = header(REQUEST_ID_HEADER);
    entry.user_agent = header("user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &config.logging.access_log_format);
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn test_config() -> Arc<Config> {
        let mut cfg = Config::load_from("/nonexistent/contact-gateway/config").unwrap();
        cfg.logging.access_log = false;
        cfg.http.max_body_size = 2048;
        Arc::new(cfg)
    }

    fn remote() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    async fn send(method: &str, path: &str, body: &str) -> (u16, hyper::HeaderMap, String) {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap();
        let resp = handle_request(req, remote(), test_config()).await.unwrap();
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_submit_success() {
        let (status, headers, body) = send(
            "POST",
            "/submit",
            r#"{"name":"Ann","email":"ann@example.com","message":"hi"}"#,
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body, r#"{"ok":true}"#);
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        assert_eq!(headers["access-control-allow-methods"], "OPTIONS,POST");
        assert_eq!(headers["content-type"], "application/json");
    }

    #[tokio::test]
    async fn test_submit_preflight() {
        let (status, headers, _) = send("OPTIONS", "/submit", "").await;
        assert_eq!(status, 200);
        assert_eq!(headers["access-control-allow-methods"], "OPTIONS,POST");
    }

    #[tokio::test]
    async fn test_submit_get_not_allowed() {
        let (status, _, body) = send("GET", "/submit", "").await;
        assert_eq!(status, 405);
        assert_eq!(body, r#"{"error":"Method Not Allowed"}"#);
    }

    #[tokio::test]
    async fn test_submit_empty_post_is_missing_fields() {
        let (status, _, _) = send("POST", "/submit", "").await;
        assert_eq!(status, 400);
    }

    #[tokio::test]
    async fn test_submit_malformed_json() {
        let (status, headers, body) = send("POST", "/submit", "{").await;
        assert_eq!(status, 500);
        assert_eq!(body, r#"{"error":"internal error"}"#);
        assert_eq!(headers["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_body_too_large() {
        let big = format!(r#"{{"message":"{}"}}"#, "x".repeat(4096));
        let (status, headers, _) = send("POST", "/submit", &big).await;
        assert_eq!(status, 413);
        assert_eq!(headers["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_invalid_utf8_body() {
        let req = Request::builder()
            .method("POST")
            .uri("/submit")
            .body(Full::new(Bytes::from_static(&[0x7b, 0xff, 0x7d])))
            .unwrap();
        let resp = handle_request(req, remote(), test_config()).await.unwrap();
        assert_eq!(resp.status(), 400);
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let (status, _, body) = send("POST", "/upload", "{}").await;
        assert_eq!(status, 404);
        assert_eq!(body, r#"{"error":"Not Found"}"#);
    }

    #[tokio::test]
    async fn test_health_probes() {
        for path in ["/healthz", "/readyz"] {
            let (status, _, body) = send("GET", path, "").await;
            assert_eq!(status, 200);
            assert_eq!(body, "ok");
        }
    }

    #[tokio::test]
    async fn test_access_log_enabled_does_not_affect_response() {
        let mut cfg = (*test_config()).clone();
        cfg.logging.access_log = true;
        cfg.logging.access_log_format = "json".to_string();
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/submit?from=test")
            .header(REQUEST_ID_HEADER, "req-1")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let resp = handle_request(req, remote(), Arc::new(cfg)).await.unwrap();
        assert_eq!(resp.status(), 200);
    }
}
