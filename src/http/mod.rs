//! HTTP protocol layer module
//!
//! Response builders and request body collection for the local host,
//! decoupled from the contact handler itself.

pub mod body;
pub mod response;

pub use body::{collect_limited, BodyError};
pub use response::{build_error_response, build_health_response};
