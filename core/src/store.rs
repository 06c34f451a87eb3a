//! Session-scoped, observable holder of the fetched catalog.
//!
//! # Design
//! `BookStore` is an explicitly owned container the application threads
//! through its views; there is no ambient global state. Mutations notify
//! every live subscriber synchronously, in subscription order, before the
//! mutating call returns, so readers observe each change exactly once and
//! in order. The store is a cache of convenience, not a source of truth:
//! after a server-side edit or delete the session discards it with
//! [`BookStore::replace_all`] rather than patching locally.
//!
//! Reviews are appended by the book's server-assigned id, never by list
//! position — positions and ids diverge as soon as the catalog is reloaded
//! in a different order.

use crate::types::{Book, Review};

/// Handle returned by [`BookStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&[Book])>;

/// In-memory book list shared across views for one session.
pub struct BookStore {
    books: Vec<Book>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookStore {
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The held sequence, in append order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Register a reader. The callback runs synchronously on every
    /// mutation until unsubscribed.
    pub fn subscribe(&mut self, callback: impl Fn(&[Book]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drop a subscriber. Returns false if the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Append a book. The store does not enforce id uniqueness; appending
    /// the same record twice produces two entries.
    pub fn add_book(&mut self, book: Book) {
        self.books.push(book);
        self.notify();
    }

    /// Append `review` to the book with the given server-assigned id.
    /// Returns false, leaving the store untouched, when no held book
    /// carries that id. With duplicate ids the first match wins.
    pub fn add_review(&mut self, book_id: u64, review: Review) -> bool {
        match self.books.iter_mut().find(|b| b.id == book_id) {
            Some(book) => {
                book.reviews.push(review);
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Discard the held sequence in favor of a fresh listing.
    pub fn replace_all(&mut self, books: Vec<Book>) {
        self.books = books;
        self.notify();
    }

    fn notify(&self) {
        for (_, callback) in &self.subscribers {
            callback(&self.books);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use time::macros::datetime;

    fn book(id: u64, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: "Machado de Assis".to_string(),
            year: "1899".to_string(),
            genre: "Romance".to_string(),
            description: None,
            reviews: Vec::new(),
        }
    }

    fn review(comment: &str) -> Review {
        Review {
            id: Some(1),
            rating: 5,
            comment: comment.to_string(),
            created_at: datetime!(2024-05-01 12:00:00 UTC),
        }
    }

    #[test]
    fn add_book_appends_and_notifies_synchronously() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_by_sub = Rc::clone(&seen);

        let mut store = BookStore::new();
        store.subscribe(move |books| seen_by_sub.borrow_mut().push(books.len()));

        store.add_book(book(1, "Dom Casmurro"));
        store.add_book(book(2, "Quincas Borba"));

        // Notification happened before add_book returned, once per mutation.
        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(store.books().len(), 2);
    }

    #[test]
    fn duplicate_appends_are_legal() {
        let mut store = BookStore::new();
        store.add_book(book(1, "Dom Casmurro"));
        store.add_book(book(1, "Dom Casmurro"));
        assert_eq!(store.books().len(), 2);
    }

    #[test]
    fn add_review_targets_server_id_not_position() {
        let mut store = BookStore::new();
        // Held out of id order: position 0 has id 9.
        store.add_book(book(9, "Iracema"));
        store.add_book(book(1, "Dom Casmurro"));

        assert!(store.add_review(1, review("Excelente")));

        assert!(store.books()[0].reviews.is_empty());
        assert_eq!(store.books()[1].reviews.len(), 1);
        assert_eq!(store.books()[1].reviews[0].comment, "Excelente");
    }

    #[test]
    fn add_review_unknown_id_is_rejected() {
        let seen = Rc::new(RefCell::new(0u32));
        let seen_by_sub = Rc::clone(&seen);

        let mut store = BookStore::new();
        store.add_book(book(1, "Dom Casmurro"));
        store.subscribe(move |_| *seen_by_sub.borrow_mut() += 1);

        assert!(!store.add_review(99, review("perdido")));
        assert!(store.books()[0].reviews.is_empty());
        assert_eq!(*seen.borrow(), 0, "a rejected mutation must not notify");
    }

    #[test]
    fn replace_all_discards_held_state() {
        let mut store = BookStore::new();
        store.add_book(book(1, "Dom Casmurro"));
        store.replace_all(vec![book(2, "Quincas Borba"), book(3, "Iracema")]);
        assert_eq!(store.books().len(), 2);
        assert_eq!(store.books()[0].id, 2);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let seen = Rc::new(RefCell::new(0u32));
        let seen_by_sub = Rc::clone(&seen);

        let mut store = BookStore::new();
        let id = store.subscribe(move |_| *seen_by_sub.borrow_mut() += 1);

        store.add_book(book(1, "Dom Casmurro"));
        assert!(store.unsubscribe(id));
        store.add_book(book(2, "Quincas Borba"));

        assert_eq!(*seen.borrow(), 1);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn subscribers_run_in_subscription_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&order);
        let second = Rc::clone(&order);

        let mut store = BookStore::new();
        store.subscribe(move |_| first.borrow_mut().push("first"));
        store.subscribe(move |_| second.borrow_mut().push("second"));

        store.add_book(book(1, "Dom Casmurro"));
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }
}
