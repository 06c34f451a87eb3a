//! Stateless request builder and response parser for the catalog API.
//!
//! # Design
//! `BookClient` holds only a `base_url` and carries no state between
//! calls. Each REST operation is split into a `build_*` method producing
//! an [`HttpRequest`] and a `parse_*` method consuming an [`HttpResponse`];
//! the executor performs the round-trip in between. Every parse funnels
//! through one status-classification primitive, so the mapping from status
//! code and error body to [`ApiError`] variant is identical across
//! operations.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Book, NewBook, NewReview, Review};

/// Fallback when a non-2xx response carries no parseable `message` body.
const GENERIC_ERROR_MESSAGE: &str = "request failed";

/// Stateless client for the book catalog API.
///
/// Builds requests and parses responses without touching the network; pair
/// it with [`crate::api::BookApi`] for the executing variant.
#[derive(Debug, Clone)]
pub struct BookClient {
    base_url: String,
}

impl BookClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_books(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/livros", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_book(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/livros/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_book(&self, input: &NewBook) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/livros", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    /// Full replacement of the editable fields; the id and the review list
    /// are untouched by an edit.
    pub fn build_edit_book(&self, id: u64, input: &NewBook) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/livros/{id}", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_book(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/livros/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Rejects out-of-range ratings before the request is built; values are
    /// never clamped into range on the caller's behalf.
    pub fn build_add_review(
        &self,
        book_id: u64,
        input: &NewReview,
    ) -> Result<HttpRequest, ApiError> {
        if !(1..=5).contains(&input.rating) {
            return Err(ApiError::ValidationFailed {
                message: format!("rating must be between 1 and 5, got {}", input.rating),
            });
        }
        let body = serde_json::to_string(input)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/livros/{book_id}/reviews", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_list_reviews(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/livros/reviews", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_books(&self, response: HttpResponse) -> Result<Vec<Book>, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_get_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_create_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        check_status(&response, 201)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_edit_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_delete_book(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }

    pub fn parse_add_review(&self, response: HttpResponse) -> Result<Review, ApiError> {
        check_status(&response, 201)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_list_reviews(&self, response: HttpResponse) -> Result<Vec<Review>, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

/// Classify a non-expected status into the matching `ApiError` variant,
/// carrying the server's `message` when the error body is parseable JSON.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let message = error_message(&response.body);
    match response.status {
        404 => Err(ApiError::NotFound { message }),
        400 | 422 => Err(ApiError::ValidationFailed { message }),
        status => Err(ApiError::ServerError { status, message }),
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}
