/* # Why a single unified catalog service?

One service handles all five catalog endpoints. All endpoints share the same
error handling and response format, there is one store handle to manage, and
the internal routing stays a flat match over path segments:

- `GET    /books`      -> list all books
- `POST   /books`      -> create a book
- `GET    /books/{id}` -> get one book
- `PUT    /books/{id}` -> replace a book's fields
- `DELETE /books/{id}` -> delete a book
- everything else      -> HTTP 404

Expected failures are encoded as responses here (Validation -> 400,
NotFound -> 404, both with a `{"message": ...}` body); only internal faults
such as serialization errors propagate as Err to the server loop.
*/

use serde::Serialize;
use tracing::{debug, info};

use libris_base::error::ErrorKind;
use libris_base::http::{HttpMethod, HttpRequest, HttpResponse, HttpService};
use libris_base::{LibrisError, LibrisResult, err};

use crate::book::{Book, BookDraft, BookId};
use crate::store::StoreHandle;

/// HTTP service exposing CRUD access to the book catalog.
#[derive(Clone)]
pub struct CatalogService {
    store: StoreHandle,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService").finish()
    }
}

impl CatalogService {
    /// Create a new CatalogService over the given store handle.
    ///
    /// # Examples
    /// ```
    /// use libris_catalog::{CatalogService, InMemoryStore, StoreHandle};
    ///
    /// let store = StoreHandle::new(InMemoryStore::seeded());
    /// let service = CatalogService::new(store);
    /// ```
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Serialize data to JSON and wrap it in a response with the given status.
    ///
    /// Serialization failure is an internal fault and surfaces as Err, which
    /// the server loop converts to HTTP 500.
    fn json_response<T: Serialize>(
        response: HttpResponse,
        data: &T,
    ) -> LibrisResult<HttpResponse> {
        let json = serde_json::to_string(data)
            .map_err(|e| err!("JSON serialization error: {}", e))?;
        Ok(response.with_content_type("application/json").with_body(json))
    }

    /// Map an expected domain failure to its HTTP response.
    ///
    /// Returns None for internal faults, which stay errors.
    fn failure_response(error: &LibrisError) -> Option<HttpResponse> {
        let (response, message) = match error.kind() {
            ErrorKind::Validation { message } => (HttpResponse::bad_request(), message),
            ErrorKind::NotFound { message } => (HttpResponse::not_found(), message),
            ErrorKind::Message { .. } => return None,
        };
        let body = serde_json::json!({ "message": message }).to_string();
        Some(response.with_content_type("application/json").with_body(body))
    }

    fn route(&self, request: &HttpRequest) -> LibrisResult<HttpResponse> {
        // Query strings are ignored for routing; a trailing slash matches the
        // bare path, as in the original service
        let path = request.path().split('?').next().unwrap_or(request.path());
        let path = path.trim_end_matches('/');
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

        match segments.as_slice() {
            ["books"] => match request.method() {
                HttpMethod::Get => self.handle_list(),
                HttpMethod::Post => self.handle_create(request),
                _ => Self::route_not_found(),
            },
            ["books", segment] => {
                let id = BookId::from_path_segment(segment);
                match request.method() {
                    HttpMethod::Get => self.handle_get(id),
                    HttpMethod::Put => self.handle_update(id, request),
                    HttpMethod::Delete => self.handle_delete(id),
                    _ => Self::route_not_found(),
                }
            }
            _ => Self::route_not_found(),
        }
    }

    /// Handle `GET /books`.
    fn handle_list(&self) -> LibrisResult<HttpResponse> {
        let books = self.store.list()?;
        debug!(count = books.len(), "listing books");
        Self::json_response(HttpResponse::ok(), &books)
    }

    /// Handle `POST /books`.
    fn handle_create(&self, request: &HttpRequest) -> LibrisResult<HttpResponse> {
        let draft = BookDraft::from_json(request.body().as_bytes());
        let (title, author) = draft.validated()?;

        let book = self.store.create(title, author)?;
        info!(id = %book.id(), title = book.title(), "created book");
        Self::json_response(HttpResponse::created(), &book)
    }

    /// Handle `GET /books/{id}`.
    fn handle_get(&self, id: Option<BookId>) -> LibrisResult<HttpResponse> {
        let book = self.lookup(id)?;
        Self::json_response(HttpResponse::ok(), &book)
    }

    /// Handle `PUT /books/{id}`.
    ///
    /// The existence check comes first: updating an absent id is 404
    /// regardless of body validity.
    fn handle_update(&self, id: Option<BookId>, request: &HttpRequest) -> LibrisResult<HttpResponse> {
        let existing = self.lookup(id)?;

        let draft = BookDraft::from_json(request.body().as_bytes());
        let (title, author) = draft.validated()?;

        match self.store.update(existing.id(), title, author)? {
            Some(book) => {
                info!(id = %book.id(), "updated book");
                Self::json_response(HttpResponse::ok(), &book)
            }
            None => Err(Self::book_not_found()),
        }
    }

    /// Handle `DELETE /books/{id}`.
    fn handle_delete(&self, id: Option<BookId>) -> LibrisResult<HttpResponse> {
        let id = id.ok_or_else(Self::book_not_found)?;
        match self.store.remove(id)? {
            Some(book) => {
                info!(id = %book.id(), "deleted book");
                Ok(HttpResponse::no_content())
            }
            None => Err(Self::book_not_found()),
        }
    }

    /// Resolve an optional parsed id to its record.
    ///
    /// A non-numeric path segment arrives here as None and yields the same
    /// not-found error as a valid-but-absent id.
    fn lookup(&self, id: Option<BookId>) -> LibrisResult<Book> {
        let id = id.ok_or_else(Self::book_not_found)?;
        self.store.get(id)?.ok_or_else(Self::book_not_found)
    }

    fn book_not_found() -> Box<LibrisError> {
        Box::new(LibrisError::not_found("Book not found"))
    }

    fn route_not_found() -> LibrisResult<HttpResponse> {
        Err(Box::new(LibrisError::not_found("Not found")))
    }
}

impl HttpService for CatalogService {
    fn handle_request(&self, request: HttpRequest) -> LibrisResult<HttpResponse> {
        debug!(method = %request.method(), path = request.path(), "dispatching request");
        match self.route(&request) {
            Ok(response) => Ok(response),
            Err(error) => match Self::failure_response(&error) {
                Some(response) => Ok(response),
                None => Err(error),
            },
        }
    }
}
