// Unexpected failures while processing a submission

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("request body is not valid JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("request body is JSON null, expected an object")]
    NullBody,
}
