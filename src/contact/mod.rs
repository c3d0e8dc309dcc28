//! Contact request validator
//!
//! Turns one gateway event into one gateway response. Every call is
//! independent: the only shared value is the compiled email pattern.
//!
//! Outcomes:
//! - `OPTIONS` preflight: 200 `{"ok":true}`
//! - any other non-`POST` method: 405
//! - missing field, malformed email, oversized field: 400
//! - accepted submission: 200 `{"ok":true}`
//! - unexpected failure (e.g. malformed JSON): 500 `{"error":"internal error"}`

mod error;
mod validate;

pub use error::HandlerError;
pub use validate::{ContactPayload, Rejection};

use crate::gateway::{ApiEvent, ApiResponse};
use crate::logger;

const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// Terminal state of a single invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Preflight,
    Rejected(Rejection),
    Accepted(ContactPayload),
}

impl Outcome {
    fn into_response(self) -> ApiResponse {
        match self {
            Self::Preflight | Self::Accepted(_) => ApiResponse::ok(200),
            Self::Rejected(reason) => ApiResponse::error(reason.status(), reason.message()),
        }
    }
}

/// Handle one gateway event; never fails
pub fn handle(event: &ApiEvent) -> ApiResponse {
    logger::log_info(&format!(
        "[Contact] Request: requestId={}",
        event.request_id().unwrap_or("-")
    ));

    match process(event) {
        Ok(outcome) => {
            // Delivery (mail, chat notification, storage) is not wired up;
            // an accepted payload is only recorded in the log.
            if let Outcome::Accepted(payload) = &outcome {
                log_accepted(payload);
            }
            outcome.into_response()
        }
        Err(e) => {
            logger::log_error(&format!("[Contact] unhandled error: {e:?} ({e})"));
            ApiResponse::error(500, INTERNAL_ERROR_MESSAGE)
        }
    }
}

/// Classify an event without building the response
pub fn process(event: &ApiEvent) -> Result<Outcome, HandlerError> {
    match event.method() {
        "OPTIONS" => return Ok(Outcome::Preflight),
        "POST" => {}
        _ => return Ok(Outcome::Rejected(Rejection::MethodNotAllowed)),
    }

    let payload = ContactPayload::parse(event.body.as_deref())?;
    if let Err(reason) = payload.validate() {
        return Ok(Outcome::Rejected(reason));
    }

    Ok(Outcome::Accepted(payload))
}

fn log_accepted(payload: &ContactPayload) {
    logger::log_info(&format!(
        "[Contact] contact payload: name={:?} email={:?} message={:?}",
        payload.name.as_deref().unwrap_or_default(),
        payload.email.as_deref().unwrap_or_default(),
        payload.message.as_deref().unwrap_or_default(),
    ));
}
