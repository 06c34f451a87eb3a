//! In-memory implementation of the book catalog REST contract.
//!
//! Serves the same routes and JSON shapes as the real catalog service so
//! the client crate's integration suite can run against live HTTP. Ids are
//! server-assigned integers from a monotonic counter; every error response
//! carries a JSON body with a `message` field.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
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

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    pub rating: u8,
    pub comment: String,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub year: String,
    pub genre: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewInput {
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Catalog {
    books: BTreeMap<u64, Book>,
    next_book_id: u64,
    next_review_id: u64,
}

pub type Db = Arc<RwLock<Catalog>>;

type ApiFailure = (StatusCode, Json<ErrorBody>);

fn failure(status: StatusCode, message: impl Into<String>) -> ApiFailure {
    (
        status,
        Json(ErrorBody {
            message: message.into(),
        }),
    )
}

fn book_not_found(id: u64) -> ApiFailure {
    failure(StatusCode::NOT_FOUND, format!("book {id} not found"))
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Catalog::default()));
    Router::new()
        .route("/livros", get(list_books).post(create_book))
        .route("/livros/reviews", get(list_reviews))
        .route(
            "/livros/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/livros/{id}/reviews", post(add_review))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn validate_book(input: &BookInput) -> Result<(), ApiFailure> {
    if input.title.trim().is_empty() {
        return Err(failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            "title must not be empty",
        ));
    }
    if input.author.trim().is_empty() {
        return Err(failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            "author must not be empty",
        ));
    }
    Ok(())
}

/// List payloads carry no reviews; only the detail endpoint populates them.
async fn list_books(State(db): State<Db>) -> Json<Vec<Book>> {
    let catalog = db.read().await;
    let books = catalog
        .books
        .values()
        .cloned()
        .map(|mut book| {
            book.reviews.clear();
            book
        })
        .collect();
    Json(books)
}

async fn create_book(
    State(db): State<Db>,
    Json(input): Json<BookInput>,
) -> Result<(StatusCode, Json<Book>), ApiFailure> {
    validate_book(&input)?;
    let mut catalog = db.write().await;
    catalog.next_book_id += 1;
    let book = Book {
        id: catalog.next_book_id,
        title: input.title,
        author: input.author,
        year: input.year,
        genre: input.genre,
        description: input.description,
        reviews: Vec::new(),
    };
    catalog.books.insert(book.id, book.clone());
    Ok((StatusCode::CREATED, Json(book)))
}

async fn get_book(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Book>, ApiFailure> {
    let catalog = db.read().await;
    catalog
        .books
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| book_not_found(id))
}

/// Replaces every editable field; id and reviews survive the edit.
async fn update_book(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<BookInput>,
) -> Result<Json<Book>, ApiFailure> {
    validate_book(&input)?;
    let mut catalog = db.write().await;
    let book = catalog.books.get_mut(&id).ok_or_else(|| book_not_found(id))?;
    book.title = input.title;
    book.author = input.author;
    book.year = input.year;
    book.genre = input.genre;
    book.description = input.description;
    Ok(Json(book.clone()))
}

async fn delete_book(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, ApiFailure> {
    let mut catalog = db.write().await;
    catalog
        .books
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| book_not_found(id))
}

async fn add_review(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<ReviewInput>,
) -> Result<(StatusCode, Json<Review>), ApiFailure> {
    if !(1..=5).contains(&input.rating) {
        return Err(failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            "rating must be between 1 and 5",
        ));
    }
    if input.comment.trim().is_empty() {
        return Err(failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            "comment must not be empty",
        ));
    }
    let mut catalog = db.write().await;
    if !catalog.books.contains_key(&id) {
        return Err(book_not_found(id));
    }
    catalog.next_review_id += 1;
    let review = Review {
        id: catalog.next_review_id,
        rating: input.rating,
        comment: input.comment,
        created_at: OffsetDateTime::now_utc(),
    };
    catalog
        .books
        .get_mut(&id)
        .expect("existence checked above")
        .reviews
        .push(review.clone());
    Ok((StatusCode::CREATED, Json(review)))
}

async fn list_reviews(State(db): State<Db>) -> Json<Vec<Review>> {
    let catalog = db.read().await;
    let reviews = catalog
        .books
        .values()
        .flat_map(|book| book.reviews.iter().cloned())
        .collect();
    Json(reviews)
}
