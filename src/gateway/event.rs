// Gateway event types
// Inbound event, outbound response and the fixed CORS header set

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::logger;

/// Headers attached to every response produced by a handler
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Allow-Methods", "OPTIONS,POST"),
];

/// Body used when a response body cannot be serialized
const FALLBACK_ERROR_BODY: &str = r#"{"error":"internal error"}"#;

/// Method assumed when the event carries none
const DEFAULT_METHOD: &str = "GET";

/// Inbound gateway event
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiEvent {
    /// REST API (v1) method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_context: Option<RequestContext>,
    /// Raw request body, `null` when the request had none
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// HTTP API (v2) method holder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct HttpContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl ApiEvent {
    /// Canonical request method
    ///
    /// The top-level `httpMethod` wins over `requestContext.http.method`.
    /// Empty strings count as absent. Falls back to `GET`.
    pub fn method(&self) -> &str {
        let nested = self
            .request_context
            .as_ref()
            .and_then(|ctx| ctx.http.as_ref())
            .and_then(|http| http.method.as_deref());

        self.http_method
            .as_deref()
            .filter(|m| !m.is_empty())
            .or_else(|| nested.filter(|m| !m.is_empty()))
            .unwrap_or(DEFAULT_METHOD)
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_context
            .as_ref()
            .and_then(|ctx| ctx.request_id.as_deref())
    }
}

/// Outbound gateway response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Serialize)]
struct OkBody {
    ok: bool,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiResponse {
    /// Build a JSON response carrying the CORS header set
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> Self {
        let body = serde_json::to_string(body).unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to serialize response body: {e}"));
            FALLBACK_ERROR_BODY.to_string()
        });

        Self {
            status_code,
            headers: CORS_HEADERS
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
            body,
        }
    }

    /// `{"ok":true}` acknowledgment
    pub fn ok(status_code: u16) -> Self {
        Self::json(status_code, &OkBody { ok: true })
    }

    /// `{"error":"..."}` response
    pub fn error(status_code: u16, message: &str) -> Self {
        Self::json(status_code, &ErrorBody { error: message })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
