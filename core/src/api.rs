//! Blocking executor pairing `BookClient` with a ureq agent.
//!
//! # Design
//! `BookApi` is the one-call surface the view layer talks to: each method
//! builds a request, performs exactly one HTTP round-trip, and parses the
//! response. No retries, no timeout, no backoff — a caller that wants a
//! retry re-invokes the method. The agent is configured with
//! status-as-error disabled so 4xx/5xx responses come back as data and the
//! parse layer owns status classification; only a call that never produced
//! a response becomes [`ApiError::TransportFailure`].

use tracing::debug;

use crate::client::BookClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Book, NewBook, NewReview, Review};

/// Environment variable naming the catalog service's base URL.
pub const BASE_URL_VAR: &str = "LIVRARIA_API_URL";

/// Executing client for the book catalog API.
#[derive(Clone)]
pub struct BookApi {
    client: BookClient,
    agent: ureq::Agent,
}

impl BookApi {
    pub fn new(base_url: &str) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            client: BookClient::new(base_url),
            agent,
        }
    }

    /// Build a client from the `LIVRARIA_API_URL` environment variable.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = std::env::var(BASE_URL_VAR)
            .map_err(|_| ApiError::TransportFailure(format!("{BASE_URL_VAR} is not set")))?;
        Ok(Self::new(&base_url))
    }

    pub fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        let response = self.execute(self.client.build_list_books())?;
        self.client.parse_list_books(response)
    }

    pub fn get_book(&self, id: u64) -> Result<Book, ApiError> {
        let response = self.execute(self.client.build_get_book(id))?;
        self.client.parse_get_book(response)
    }

    pub fn create_book(&self, input: &NewBook) -> Result<Book, ApiError> {
        let request = self.client.build_create_book(input)?;
        let response = self.execute(request)?;
        self.client.parse_create_book(response)
    }

    pub fn edit_book(&self, id: u64, input: &NewBook) -> Result<Book, ApiError> {
        let request = self.client.build_edit_book(id, input)?;
        let response = self.execute(request)?;
        self.client.parse_edit_book(response)
    }

    pub fn delete_book(&self, id: u64) -> Result<(), ApiError> {
        let response = self.execute(self.client.build_delete_book(id))?;
        self.client.parse_delete_book(response)
    }

    pub fn add_review(&self, book_id: u64, input: &NewReview) -> Result<Review, ApiError> {
        let request = self.client.build_add_review(book_id, input)?;
        let response = self.execute(request)?;
        self.client.parse_add_review(response)
    }

    pub fn list_reviews(&self) -> Result<Vec<Review>, ApiError> {
        let response = self.execute(self.client.build_list_reviews())?;
        self.client.parse_list_reviews(response)
    }

    /// Perform one round-trip. 4xx/5xx statuses are returned as data.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method, path, body, ..
        } = request;

        let result = match (&method, body) {
            (HttpMethod::Get, _) => self.agent.get(&path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&path).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&path).send_empty(),
        };

        let mut response = result.map_err(|e| ApiError::TransportFailure(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::TransportFailure(e.to_string()))?;

        debug!(method = method.as_str(), %path, status, "request settled");

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_reads_base_url() {
        // Only this test touches the variable.
        std::env::set_var(BASE_URL_VAR, "http://localhost:3000");
        assert!(BookApi::from_env().is_ok());
    }

    #[test]
    fn transport_failure_on_connection_refused() {
        // Port 1 on loopback refuses immediately.
        let api = BookApi::new("http://127.0.0.1:1");
        let err = api.list_books().unwrap_err();
        assert!(matches!(err, ApiError::TransportFailure(_)));
    }
}
