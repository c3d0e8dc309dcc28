//! Request body collection with a size cap

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderMap, CONTENT_LENGTH};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum BodyError {
    /// Declared or actual size exceeds the limit
    TooLarge,
    /// The body stream failed (e.g. client went away)
    Read(BoxError),
}

/// Declared `Content-Length`, if present and numeric
pub fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Collect a request body, failing once it grows past `max_bytes`
///
/// A declared `Content-Length` above the limit fails before reading.
pub async fn collect_limited<B>(
    headers: &HeaderMap,
    body: B,
    max_bytes: u64,
) -> Result<Bytes, BodyError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    if content_length(headers).is_some_and(|len| len > max_bytes) {
        return Err(BodyError::TooLarge);
    }

    let limit = usize::try_from(max_bytes).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => Err(BodyError::TooLarge),
        Err(e) => Err(BodyError::Read(e)),
    }
}
