//! State machine for a single book's detail view.
//!
//! # Design
//! A detail view loads one book, then cycles through review submissions:
//! `Loading → Loaded | Failed`, and from `Loaded`,
//! `SubmittingReview → Loaded` around each submission. Two rules keep the
//! machine honest:
//!
//! - Load resolutions are token-guarded. `begin_load` mints a
//!   [`RequestToken`] and invalidates every earlier one, so a response
//!   that settles after the view re-loaded (or was torn down via
//!   [`BookDetail::detach`]) is a no-op instead of clobbering newer state.
//! - `complete_review` takes the server-returned [`Review`], so the
//!   locally appended record always carries the canonical id and
//!   timestamp; no client-synthesized placeholder enters the list.

use crate::error::ApiError;
use crate::types::{Book, Review};

/// Proof that a load resolution belongs to the current load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Where the detail view currently stands.
#[derive(Debug)]
pub enum DetailState {
    Loading,
    Loaded(Book),
    SubmittingReview(Book),
    Failed(ApiError),
}

/// Detail-view state for one book, driven by the view's callbacks.
#[derive(Debug)]
pub struct BookDetail {
    state: DetailState,
    epoch: u64,
}

impl Default for BookDetail {
    fn default() -> Self {
        Self::new()
    }
}

impl BookDetail {
    pub fn new() -> Self {
        Self {
            state: DetailState::Loading,
            epoch: 0,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// The book, when one is held (`Loaded` or `SubmittingReview`).
    pub fn book(&self) -> Option<&Book> {
        match &self.state {
            DetailState::Loaded(book) | DetailState::SubmittingReview(book) => Some(book),
            DetailState::Loading | DetailState::Failed(_) => None,
        }
    }

    /// Enter `Loading` and mint the token the eventual resolution must
    /// present. Any token from an earlier attempt goes stale.
    pub fn begin_load(&mut self) -> RequestToken {
        self.epoch += 1;
        self.state = DetailState::Loading;
        RequestToken(self.epoch)
    }

    /// Invalidate outstanding tokens without starting a new load. Called
    /// when the view is torn down while a request is in flight.
    pub fn detach(&mut self) {
        self.epoch += 1;
    }

    /// Apply a settled fetch. Returns false (leaving state untouched) when
    /// `token` is not from the current attempt.
    pub fn resolve_load(&mut self, token: RequestToken, result: Result<Book, ApiError>) -> bool {
        if token.0 != self.epoch {
            return false;
        }
        self.state = match result {
            Ok(book) => DetailState::Loaded(book),
            Err(err) => DetailState::Failed(err),
        };
        true
    }

    /// Enter `SubmittingReview`. Returns false unless currently `Loaded`.
    pub fn begin_review(&mut self) -> bool {
        match std::mem::replace(&mut self.state, DetailState::Loading) {
            DetailState::Loaded(book) => {
                self.state = DetailState::SubmittingReview(book);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Append the server's canonical record and return to `Loaded`.
    /// Returns false unless currently `SubmittingReview`.
    pub fn complete_review(&mut self, review: Review) -> bool {
        match std::mem::replace(&mut self.state, DetailState::Loading) {
            DetailState::SubmittingReview(mut book) => {
                book.reviews.push(review);
                self.state = DetailState::Loaded(book);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Return to `Loaded` with the book unchanged after a failed
    /// submission. Returns false unless currently `SubmittingReview`.
    pub fn fail_review(&mut self) -> bool {
        match std::mem::replace(&mut self.state, DetailState::Loading) {
            DetailState::SubmittingReview(book) => {
                self.state = DetailState::Loaded(book);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }
}
