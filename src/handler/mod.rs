//! Request handler module
//!
//! Routes requests on the local host: health probes, the contact submit
//! path, and a JSON 404 for everything else.

pub mod router;

pub use router::handle_request;
