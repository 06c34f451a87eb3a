//! Domain DTOs for the book catalog service.
//!
//! # Design
//! These types mirror the catalog service's JSON schema but are defined
//! independently of the mock-server crate; the integration suite catches
//! any drift between the two. Identities are server-assigned integers —
//! a `Book` only exists client-side once the server has answered with an
//! id, so the fetched shape carries `id` unconditionally while the create
//! payload (`NewBook`) carries none.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A catalog record as returned by the service.
///
/// List payloads omit `reviews`; only the detail endpoint populates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub year: String,
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
}

/// Payload for creating a book, and for replacing every editable field of
/// an existing one. The server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: String,
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A star rating attached to exactly one book. Immutable once created.
///
/// `id` is absent until the server has assigned one. `created_at` travels
/// as an RFC 3339 string under the JSON key `createdAt`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub rating: u8,
    pub comment: String,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Payload for submitting a review. The server assigns id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub rating: u8,
    pub comment: String,
}
