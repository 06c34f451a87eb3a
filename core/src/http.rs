//! HTTP exchanges described as plain data.
//!
//! # Design
//! The client core never opens a socket. It produces `HttpRequest` values
//! and consumes `HttpResponse` values; whoever sits on the network boundary
//! (the bundled [`crate::api::BookApi`] executor, or a test harness feeding
//! canned responses) performs the round-trip in between. Keeping the
//! exchange as data makes request building and status classification
//! testable without a server. All fields are owned so values can be moved
//! freely between the builder, the executor, and test code.

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Uppercase wire name, used for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A request the executor should perform.
///
/// Produced by `BookClient::build_*` methods. `path` is the full URL
/// including the base; `body`, when present, is a serialized JSON document
/// and is always accompanied by a `content-type: application/json` header.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// The settled outcome of an executed request.
///
/// Handed to `BookClient::parse_*` methods, which classify the status code
/// and decode the body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
