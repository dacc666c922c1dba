/* # Why create a BookStore trait?

The BookStore trait abstracts how records are kept. The catalog ships with an
in-memory implementation only, but the service depends on the abstraction, so
a persistent backend can be swapped in without touching the HTTP layer, and
tests can construct isolated stores instead of sharing process-wide state.

All operations return LibrisResult for consistent error handling even though
the in-memory implementation is infallible.
*/

use std::sync::Arc;

use parking_lot::RwLock;

use libris_base::LibrisResult;

use crate::book::{Book, BookId};

/// Trait for book storage implementations.
///
/// The store owns id assignment: `create` draws from a monotonic counter that
/// never reuses an id, even after deletion.
pub trait BookStore: Send + Sync + 'static {
    /// List all books in insertion order.
    fn list(&self) -> LibrisResult<Vec<Book>>;

    /// Retrieve a book by id.
    ///
    /// # Returns
    /// * `Ok(Some(book))` - If the record exists
    /// * `Ok(None)` - If no record with that id exists
    fn get(&self, id: BookId) -> LibrisResult<Option<Book>>;

    /// Check if a record with the given id exists.
    fn contains(&self, id: BookId) -> LibrisResult<bool>;

    /// Create a record with the next available id and append it.
    ///
    /// The caller is expected to have validated the fields; the store does
    /// not re-check them.
    fn create(&mut self, title: String, author: String) -> LibrisResult<Book>;

    /// Replace the title and author of an existing record, keeping its id.
    ///
    /// # Returns
    /// * `Ok(Some(book))` - The updated record
    /// * `Ok(None)` - If no record with that id exists
    fn update(&mut self, id: BookId, title: String, author: String) -> LibrisResult<Option<Book>>;

    /// Remove a record by id.
    ///
    /// # Returns
    /// * `Ok(Some(book))` - The removed record if it existed
    /// * `Ok(None)` - If no record with that id existed
    fn remove(&mut self, id: BookId) -> LibrisResult<Option<Book>>;

    /// Remove all records. The id counter is not reset.
    fn clear(&mut self) -> LibrisResult<()>;

    /// Get the number of records in the store.
    fn len(&self) -> LibrisResult<usize>;

    /// Returns true if the store contains no records.
    fn is_empty(&self) -> LibrisResult<bool>;
}

/* # Why wrap the store in StoreHandle?

The host server may dispatch requests from more than one thread, so the
collection and the id counter sit behind a single mutual-exclusion scope.
StoreHandle provides cheap cloning (via Arc) and interior mutability (via
RwLock), so the service holds an owned handle instead of global state.
*/

/// A thread-safe handle to a book store.
#[derive(Clone)]
pub struct StoreHandle(Arc<RwLock<dyn BookStore>>);

impl StoreHandle {
    /// Create a new StoreHandle wrapping the given store implementation.
    pub fn new<S: BookStore>(store: S) -> Self {
        Self(Arc::new(RwLock::new(store)))
    }

    /// List all books. See [`BookStore::list`].
    pub fn list(&self) -> LibrisResult<Vec<Book>> {
        self.0.read().list()
    }

    /// Retrieve a book by id. See [`BookStore::get`].
    pub fn get(&self, id: BookId) -> LibrisResult<Option<Book>> {
        self.0.read().get(id)
    }

    /// Check if a record exists. See [`BookStore::contains`].
    pub fn contains(&self, id: BookId) -> LibrisResult<bool> {
        self.0.read().contains(id)
    }

    /// Create a record. See [`BookStore::create`].
    pub fn create(&self, title: String, author: String) -> LibrisResult<Book> {
        self.0.write().create(title, author)
    }

    /// Update a record. See [`BookStore::update`].
    pub fn update(&self, id: BookId, title: String, author: String) -> LibrisResult<Option<Book>> {
        self.0.write().update(id, title, author)
    }

    /// Remove a record. See [`BookStore::remove`].
    pub fn remove(&self, id: BookId) -> LibrisResult<Option<Book>> {
        self.0.write().remove(id)
    }

    /// Remove all records. See [`BookStore::clear`].
    pub fn clear(&self) -> LibrisResult<()> {
        self.0.write().clear()
    }

    /// Get the number of records. See [`BookStore::len`].
    pub fn len(&self) -> LibrisResult<usize> {
        self.0.read().len()
    }

    /// Check if the store is empty. See [`BookStore::is_empty`].
    pub fn is_empty(&self) -> LibrisResult<bool> {
        self.0.read().is_empty()
    }
}
