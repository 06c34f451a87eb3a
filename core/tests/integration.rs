//! Full catalog lifecycle against the live mock server.
//!
//! Starts the mock server on a random port, then drives every `BookApi`
//! operation over real HTTP, checking the round-trip properties the client
//! guarantees: field echo on create, NotFound discrimination, review
//! append semantics, and delete visibility.

use livraria_core::{ApiError, BookApi, NewBook, NewReview};

fn start_mock_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn dom_casmurro() -> NewBook {
    NewBook {
        title: "Dom Casmurro".to_string(),
        author: "Machado de Assis".to_string(),
        year: "1899".to_string(),
        genre: "Romance".to_string(),
        description: None,
    }
}

#[test]
fn catalog_lifecycle() {
    let api = BookApi::new(&start_mock_server());

    // Empty catalog lists as an empty sequence, not an error.
    let books = api.list_books().unwrap();
    assert!(books.is_empty(), "expected empty catalog");

    // Create: the four submitted fields come back unchanged, id assigned.
    let created = api.create_book(&dom_casmurro()).unwrap();
    assert!(created.id > 0);
    assert_eq!(created.title, "Dom Casmurro");
    assert_eq!(created.author, "Machado de Assis");
    assert_eq!(created.year, "1899");
    assert_eq!(created.genre, "Romance");
    let id = created.id;

    // Get round-trips the created record.
    let fetched = api.get_book(id).unwrap();
    assert_eq!(fetched, created);
    assert!(fetched.reviews.is_empty());

    // Review: server assigns id and timestamp, rating/comment echo back.
    let review = api
        .add_review(
            id,
            &NewReview {
                rating: 5,
                comment: "Excelente".to_string(),
            },
        )
        .unwrap();
    assert_eq!(review.rating, 5);
    assert_eq!(review.comment, "Excelente");
    assert!(review.id.is_some(), "server must assign a review id");

    // The detail payload's review list grew by exactly one.
    let detailed = api.get_book(id).unwrap();
    assert_eq!(detailed.reviews.len(), 1);
    assert_eq!(detailed.reviews[0], review);

    // List payloads still omit reviews.
    let books = api.list_books().unwrap();
    assert_eq!(books.len(), 1);
    assert!(books[0].reviews.is_empty());

    // Edit replaces all editable fields, keeps id and reviews.
    let edit = NewBook {
        title: "Quincas Borba".to_string(),
        author: "Machado de Assis".to_string(),
        year: "1891".to_string(),
        genre: "Romance".to_string(),
        description: Some("Sequência de Memórias Póstumas".to_string()),
    };
    let edited = api.edit_book(id, &edit).unwrap();
    assert_eq!(edited.id, id);
    assert_eq!(edited.title, "Quincas Borba");
    assert_eq!(edited.description.as_deref(), Some("Sequência de Memórias Póstumas"));
    assert_eq!(api.get_book(id).unwrap().reviews.len(), 1);

    // Catalog-wide review listing.
    let reviews = api.list_reviews().unwrap();
    assert_eq!(reviews.len(), 1);

    // Delete, then the id no longer resolves and the listing shrinks.
    api.delete_book(id).unwrap();
    let err = api.get_book(id).unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
    assert!(api.list_books().unwrap().is_empty());

    // Repeated delete surfaces the server's 404.
    let err = api.delete_book(id).unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[test]
fn validation_failures_are_discriminated() {
    let api = BookApi::new(&start_mock_server());

    // Server-side rejection: empty title.
    let invalid = NewBook {
        title: "".to_string(),
        author: "Anônimo".to_string(),
        year: "2000".to_string(),
        genre: "Romance".to_string(),
        description: None,
    };
    let err = api.create_book(&invalid).unwrap_err();
    match err {
        ApiError::ValidationFailed { message } => {
            assert_eq!(message, "title must not be empty");
        }
        other => panic!("expected ValidationFailed, got {other}"),
    }

    // Client-side rejection: out-of-range rating never reaches the wire.
    let created = api.create_book(&dom_casmurro()).unwrap();
    let err = api
        .add_review(
            created.id,
            &NewReview {
                rating: 6,
                comment: "demais".to_string(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::ValidationFailed { .. }));

    // The rejected rating was not clamped into range behind the caller's back.
    assert!(api.get_book(created.id).unwrap().reviews.is_empty());

    // Reviews against a deleted book are NotFound, not ValidationFailed.
    api.delete_book(created.id).unwrap();
    let err = api
        .add_review(
            created.id,
            &NewReview {
                rating: 4,
                comment: "tarde demais".to_string(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}
