use model::item::ItemError;
use store::StoreError;

/// Any failure while handling a request.
/// These are logged once by the handler and returned to the runtime as-is.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    // The body is flagged as base64 but doesn't decode
    #[error("invalid base64 body: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    // The decoded body isn't UTF-8 text
    #[error("invalid UTF-8 body: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    // Malformed JSON, or a required key is missing or of the wrong type
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("invalid item: {0}")]
    InvalidItem(#[from] ItemError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
