//! Client core for a book catalog service.
//!
//! # Overview
//! Everything a view layer needs to talk to the remote catalog: typed DTOs,
//! a stateless request builder / response parser, a blocking executor, and
//! the in-memory state (catalog store and per-book detail machine) views
//! subscribe to.
//!
//! # Design
//! - `BookClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network; `BookApi` adds the round-trip.
//! - Failures form a closed, status-discriminated set (`ApiError`), so
//!   callers branch on variants rather than message text.
//! - `BookStore` and `BookDetail` are explicitly owned and single-threaded;
//!   subscribers are notified synchronously with each mutation.
//! - DTOs are defined independently from the mock-server crate; the
//!   integration suite catches schema drift.

pub mod api;
pub mod client;
pub mod detail;
pub mod error;
pub mod http;
pub mod store;
pub mod types;

pub use api::BookApi;
pub use client::BookClient;
pub use detail::{BookDetail, DetailState, RequestToken};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{BookStore, SubscriptionId};
pub use types::{Book, NewBook, NewReview, Review};
