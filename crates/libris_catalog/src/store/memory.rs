/* # Why a Vec instead of a map?

The catalog must list records in insertion order, and lookups are by-id over a
handful of records, so an ordered Vec with a linear scan is both simpler and
faithful to the required ordering. The first match wins on lookup; duplicate
ids cannot occur because only the counter assigns them.
*/

use libris_base::LibrisResult;

use crate::book::{Book, BookId};
use crate::store::traits::BookStore;

/// An in-memory book store backed by a Vec, preserving insertion order.
///
/// Holds the records together with the `next_id` counter that is the sole
/// source of new ids. The counter only ever increments, so ids are unique for
/// the lifetime of the store and never reused after deletion.
///
/// # Example
///
/// ```
/// use libris_catalog::store::{BookStore, InMemoryStore};
///
/// let mut store = InMemoryStore::new();
/// let book = store.create("Dune".to_string(), "Herbert".to_string()).unwrap();
///
/// assert!(store.contains(book.id()).unwrap());
/// assert_eq!(store.len().unwrap(), 1);
/// ```
#[derive(Debug)]
pub struct InMemoryStore {
    books: Vec<Book>,
    next_id: u64,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store. The first assigned id is 1.
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a store pre-populated with the two seed records the service
    /// starts with (ids 1 and 2; the counter continues at 3).
    pub fn seeded() -> Self {
        Self {
            books: vec![
                Book::new(BookId::new(1), "The Great Gatsby", "F. Scott Fitzgerald"),
                Book::new(BookId::new(2), "To Kill a Mockingbird", "Harper Lee"),
            ],
            next_id: 3,
        }
    }

    fn position(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|book| book.id() == id)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookStore for InMemoryStore {
    fn list(&self) -> LibrisResult<Vec<Book>> {
        Ok(self.books.clone())
    }

    fn get(&self, id: BookId) -> LibrisResult<Option<Book>> {
        Ok(self.books.iter().find(|book| book.id() == id).cloned())
    }

    fn contains(&self, id: BookId) -> LibrisResult<bool> {
        Ok(self.position(id).is_some())
    }

    fn create(&mut self, title: String, author: String) -> LibrisResult<Book> {
        let book = Book::new(BookId::new(self.next_id), title, author);
        self.next_id += 1;
        self.books.push(book.clone());
        Ok(book)
    }

    fn update(&mut self, id: BookId, title: String, author: String) -> LibrisResult<Option<Book>> {
        match self.position(id) {
            Some(index) => {
                self.books[index].replace_fields(title, author);
                Ok(Some(self.books[index].clone()))
            }
            None => Ok(None),
        }
    }

    fn remove(&mut self, id: BookId) -> LibrisResult<Option<Book>> {
        match self.position(id) {
            Some(index) => Ok(Some(self.books.remove(index))),
            None => Ok(None),
        }
    }

    fn clear(&mut self) -> LibrisResult<()> {
        self.books.clear();
        Ok(())
    }

    fn len(&self) -> LibrisResult<usize> {
        Ok(self.books.len())
    }

    fn is_empty(&self) -> LibrisResult<bool> {
        Ok(self.books.is_empty())
    }
}
