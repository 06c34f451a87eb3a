//! Error taxonomy for the book catalog client.
//!
//! # Design
//! Failures are discriminated by HTTP status at parse time so callers
//! branch on the variant instead of matching message text: 404 becomes
//! `NotFound`, 400/422 become `ValidationFailed`, and every other non-2xx
//! status lands in `ServerError` with the raw code. `TransportFailure`
//! covers calls that never produced a response at all. Whatever the
//! variant, `message` carries the server's own `message` field when the
//! error body was parseable JSON, and a generic fallback otherwise.

use std::fmt;

/// Errors returned by `BookClient` and `BookApi` operations.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404 — the requested book does not exist.
    NotFound { message: String },

    /// The server rejected the payload (400 or 422), or the client refused
    /// to send it (e.g. a rating outside 1–5).
    ValidationFailed { message: String },

    /// Any other non-2xx status.
    ServerError { status: u16, message: String },

    /// The request never settled into an HTTP response.
    TransportFailure(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { message } => write!(f, "not found: {message}"),
            ApiError::ValidationFailed { message } => {
                write!(f, "validation failed: {message}")
            }
            ApiError::ServerError { status, message } => {
                write!(f, "server error (HTTP {status}): {message}")
            }
            ApiError::TransportFailure(msg) => write!(f, "transport failure: {msg}"),
            ApiError::SerializationError(msg) => write!(f, "serialization failed: {msg}"),
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
