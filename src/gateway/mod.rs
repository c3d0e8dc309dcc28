//! API gateway event layer
//!
//! Models the request object an API gateway hands to a function and the
//! response object it expects back. Two gateway generations are supported:
//! REST APIs put the method in a top-level `httpMethod`, HTTP APIs nest it
//! under `requestContext.http.method`.

pub mod adapter;
mod event;

pub use event::{ApiEvent, ApiResponse, RequestContext, CORS_HEADERS};
